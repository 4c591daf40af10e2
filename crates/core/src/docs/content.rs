//! Built-in marketplace documentation.
//!
//! Defined once and never mutated. Section order here is the sidebar order and
//! the tie-break order for search.

use std::sync::LazyLock;

use super::{DocLibrary, DocSection};

/// Section shown when the docs page opens without a selection.
pub const DEFAULT_SECTION: &str = "getting-started";

const SECTIONS: &[(&str, &str, &str)] = &[
    (
        "getting-started",
        "Getting Started",
        r#"# Getting Started
AgentMint lets you browse, mint and deploy **prebuilt AI agents** that act on-chain on your behalf.

## What you need
- A browser wallet such as MetaMask, Phantom or Coinbase Wallet
- A small balance on the chain you want to deploy to, for gas
- Optional: an API key if you plan to call agents from your own backend

## First steps
1. Connect your wallet from the top-right button
2. Open the **Agent Store** and pick an agent
3. Mint it to your wallet, then launch the **Deploy Wizard**

Minted agents show up under **My Agents** as soon as the transaction confirms."#,
    ),
    (
        "wallet-connection",
        "Wallet Connection",
        r#"# Wallet Connection
Every action that changes state on-chain is signed by your wallet. AgentMint never holds your keys.

## Supported wallets
- MetaMask and any injected EVM wallet
- WalletConnect compatible mobile wallets
- Phantom for Solana agents

## Switching networks
When an agent targets a different chain than the one your wallet is on, you will be asked to switch. Agents marked **Multi-chain** work on any supported network.

## Troubleshooting
- If the connect button does nothing, unlock your wallet extension and reload
- If a signature request never appears, check for a blocked popup
- Disconnecting from the wallet side also signs you out of AgentMint"#,
    ),
    (
        "minting",
        "Minting Agents",
        r#"# Minting Agents
Minting creates an on-chain token that proves ownership of an agent instance. Owning the token unlocks configuration, chat and deployment for that agent.

## Mint flow
1. Select an agent and press **Mint**
2. Review the price and estimated gas
3. Approve the transaction in your wallet
4. Wait for confirmation; the status badge switches to **Minted**

## Pricing
Free agents only cost gas. Premium agents charge a one-time price in the chain's native token.

## Checking mint status
The backend exposes the current state of a mint:

```http
GET /api/mint/status?tx=0xabc123
```

A response of `pending` means the transaction is still in the mempool."#,
    ),
    (
        "agent-store",
        "Agent Store",
        r#"# Agent Store
The store lists every agent published to the marketplace.

## Filtering
- **Category** narrows by use case, such as DeFi, Trading or Social
- **Chain** shows agents that run on the selected networks
- **Search** matches the agent name, description and category
- **Free only** and **Verified only** toggles hide paid or unreviewed agents

Filters combine: an agent must satisfy every active filter to be shown.

## Verified agents
Verified agents have had their code and permissions reviewed by the AgentMint team. Unverified agents still work but deserve extra care before you grant them spending rights."#,
    ),
    (
        "deploy-wizard",
        "Deploy Wizard",
        r#"# Deploy Wizard
The wizard turns a minted agent into a running deployment.

## Steps
1. Choose the minted agent to deploy
2. Pick the target chain and RPC endpoint
3. Set spending limits and allowed contracts
4. Review and sign the deployment transaction

## Configuration file
Advanced users can upload a configuration instead of filling in the form:

```json
{
  "agent": "yield-optimizer",
  "chain": "base",
  "limits": { "daily": "0.5" }
}
```

Deployments can be paused at any time from **My Agents**."#,
    ),
    (
        "mcp-marketplace",
        "MCP Marketplace",
        r#"# MCP Marketplace
Model Context Protocol services give agents access to external data and tools.

## Integration modes
- **stdio**: the service runs as a local process next to the agent
- **sse**: the service is reached over HTTP with server-sent events
- **api**: a hosted endpoint called with an API key

## Adding a service to an agent
1. Open the service page and press **Connect**
2. Pick the agent that should use it
3. Approve the requested permissions

## Example client configuration
```json
{
  "mcpServers": {
    "chain-data": { "command": "chain-data-mcp", "args": ["--network", "base"] }
  }
}
```"#,
    ),
    (
        "tools",
        "Tools",
        r#"# Tools
Tools are single-purpose utilities that agents call during a task, such as price feeds, CSV exporters or notification senders.

## Using a tool
- Tools marked **Free** can be attached to any agent you own
- Paid tools are billed per call from the agent's balance

## Building your own
Publish a tool by registering its manifest with the backend. See the API reference for the request format."#,
    ),
    (
        "agent-chat",
        "Chatting with Agents",
        r#"# Chatting with Agents
Owned agents can be instructed in plain language from the chat panel.

## Tips
- Be explicit about amounts and tokens
- Ask the agent to **explain** a plan before executing it
- Chat history is stored per agent and per wallet

Chat requests are answered by the hosted model service; responses may take a few seconds."#,
    ),
    (
        "api-reference",
        "API Reference",
        r#"# API Reference
All endpoints return JSON and live under `/api`.

## Catalog
- `GET /api/agents` lists agents
- `GET /api/tools` lists tools
- `GET /api/mcp-services` lists MCP services

## Agents
- `GET /api/agents/{id}` returns one agent
- `POST /api/agents/{id}/chat` sends a chat message

## Example
```bash
curl -s https://agentmint.example/api/agents | jq '.[0].name'
```"#,
    ),
    (
        "faq",
        "FAQ",
        r#"# Frequently Asked Questions

## Is minting free?
Free agents only cost network gas. Premium agents show their price before you sign.

## Can I transfer a minted agent?
Yes. The agent token is a standard NFT and moves with your wallet. The new owner gets access to the agent's configuration.

## What happens if a deployment fails?
Nothing is charged beyond gas for the failed transaction. Retry from the Deploy Wizard."#,
    ),
];

static BUILTIN: LazyLock<DocLibrary> = LazyLock::new(|| {
    let sections = SECTIONS
        .iter()
        .map(|(id, title, body)| DocSection::new(*id, *title, *body))
        .collect();

    DocLibrary::new(sections).expect("built-in docs have unique, non-empty ids")
});

/// The documentation compiled into the binary.
pub fn builtin_library() -> &'static DocLibrary {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::{render, search, Block, ResultKind};

    #[test]
    fn test_builtin_library_loads() {
        let library = builtin_library();
        assert_eq!(library.len(), SECTIONS.len());
        assert!(library.get(DEFAULT_SECTION).is_some());
    }

    #[test]
    fn test_builtin_sections_have_closed_fences() {
        for section in builtin_library() {
            let fences = section
                .body
                .lines()
                .filter(|line| line.starts_with("```"))
                .count();
            assert_eq!(fences % 2, 0, "unbalanced fence in {}", section.id);
        }
    }

    #[test]
    fn test_builtin_sections_start_with_heading() {
        for section in builtin_library() {
            let first = render(&section.body).next();
            assert!(
                matches!(first, Some(Block::Heading { .. })),
                "{} should open with a heading",
                section.id
            );
        }
    }

    #[test]
    fn test_builtin_search_wallet_ranks_title_first() {
        let result = search("wallet", DEFAULT_SECTION, builtin_library());
        assert_eq!(result.kind, ResultKind::MultipleMatches);
        assert_eq!(result.matches[0].id, "wallet-connection");
    }
}

use crate::models::ProtocolEntry;

// Contract addresses on Base mainnet, compared lower-cased.
pub struct BaseContracts;

impl BaseContracts {
    // Uniswap
    pub const UNISWAP_SWAP_ROUTER_02: &'static str = "0x2626664c2603336E57B271c5C0b26F421741e481";
    pub const UNISWAP_SWAP_ROUTER_02_CANONICAL: &'static str = "0x68B3465833fb72A70ecDF485E0e4C7bD8665Fc45";
    pub const UNISWAP_UNIVERSAL_ROUTER: &'static str = "0x3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD";

    // Aerodrome
    pub const AERODROME_ROUTER: &'static str = "0xcF77a3Ba9A5CA399B7c97c74d54e5b1Beb874E43";

    // OpenSea Seaport
    pub const SEAPORT_1_1: &'static str = "0x00000000006c3852cbeF3e08E8dF289169EdE581";
    pub const SEAPORT_1_5: &'static str = "0x00000000000000ADc04C56Bf30aC9d3c0aAF14dC";

    // OP Stack predeploy
    pub const WETH: &'static str = "0x4200000000000000000000000000000000000006";

    // Native USDC
    pub const USDC: &'static str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
}

/// Built-in protocol table. Later entries win on duplicate addresses.
pub fn protocols() -> Vec<ProtocolEntry> {
    vec![
        // DEXes
        ProtocolEntry::new(
            "uniswap",
            "Uniswap",
            &["dex", "swap"],
            &[
                BaseContracts::UNISWAP_SWAP_ROUTER_02,
                BaseContracts::UNISWAP_SWAP_ROUTER_02_CANONICAL,
                BaseContracts::UNISWAP_UNIVERSAL_ROUTER,
            ],
        ),
        ProtocolEntry::new(
            "aerodrome",
            "Aerodrome",
            &["dex", "amm"],
            &[BaseContracts::AERODROME_ROUTER],
        ),
        // NFT / marketplace
        ProtocolEntry::new(
            "seaport",
            "Seaport",
            &["nft", "marketplace"],
            &[BaseContracts::SEAPORT_1_1, BaseContracts::SEAPORT_1_5],
        ),
        // Tokens
        ProtocolEntry::new("weth", "WETH", &["token"], &[BaseContracts::WETH]),
        ProtocolEntry::new("usdc", "USDC", &["token", "stable"], &[BaseContracts::USDC]),
    ]
}

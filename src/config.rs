use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkCfg {
    pub chain_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletCfg {
    pub key_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractCfg {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenCfg {
    pub native: TokenInfoCfg,
    pub token: TokenInfoCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfoCfg {
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcCfg,
    pub network: NetworkCfg,
    pub contract: ContractCfg,
    pub wallet: Option<WalletCfg>,
    pub tokens: Option<TokenCfg>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse Config.toml")?;
        Ok(cfg)
    }
}

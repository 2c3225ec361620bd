//! Static wallet descriptors: identity, deep links and app-store listings.

mod generated;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct WalletInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub homepage: &'static str,
    pub image_id: &'static str,
    pub app: WalletApps,
    pub rdns: Option<&'static str>,
    pub mobile: WalletLinks,
    pub desktop: WalletLinks,
}

/// Store or download link per platform.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct WalletApps {
    pub browser: Option<&'static str>,
    pub ios: Option<&'static str>,
    pub android: Option<&'static str>,
    pub mac: Option<&'static str>,
    pub windows: Option<&'static str>,
    pub linux: Option<&'static str>,
    pub chrome: Option<&'static str>,
    pub firefox: Option<&'static str>,
    pub safari: Option<&'static str>,
    pub edge: Option<&'static str>,
    pub opera: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct WalletLinks {
    pub native: Option<&'static str>,
    pub universal: Option<&'static str>,
}

impl WalletLinks {
    /// Universal links open in a browser when the app is missing, so they win.
    pub fn preferred(&self) -> Option<&'static str> {
        self.universal.or(self.native)
    }
}

impl WalletInfo {
    pub fn mobile_deep_link(&self) -> Option<&'static str> {
        self.mobile.preferred()
    }

    pub fn desktop_deep_link(&self) -> Option<&'static str> {
        self.desktop.preferred()
    }
}

pub fn all_wallets() -> &'static [&'static WalletInfo] {
    generated::WALLETS
}

pub fn wallet_by_id(id: &str) -> Option<&'static WalletInfo> {
    all_wallets().iter().copied().find(|wallet| wallet.id == id)
}

use cr_chain_types::Chain;
use url::Url;

use crate::cache::default_rpc_url;

pub const API_KEY_PLACEHOLDER: &str = "${THIRDWEB_API_KEY}";

/// Non-hosted endpoints are returned as-is.
pub fn rpc_url_for_chain(chain: &Chain, client_id: &str, rpc_domain: &str) -> String {
    if chain.rpc.trim().is_empty() {
        return format!("{}/{client_id}", default_rpc_url(chain.id, rpc_domain));
    }

    let substituted = chain.rpc.replace(API_KEY_PLACEHOLDER, client_id);
    let Ok(mut url) = Url::parse(&substituted) else {
        return chain.rpc.clone();
    };

    if !is_hosted_rpc(&url, rpc_domain) {
        return chain.rpc.clone();
    }

    if url.path() == "/" || url.path().starts_with("/$") {
        url.set_path(&format!("/{client_id}"));
    }

    url.to_string()
}

fn is_hosted_rpc(url: &Url, rpc_domain: &str) -> bool {
    url.host_str().is_some_and(|host| {
        host == rpc_domain
            || host
                .strip_suffix(rpc_domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

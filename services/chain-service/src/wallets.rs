use axum::{Json, extract::Path};
use cr_wallet_metadata::{WalletInfo, wallet_by_id};

use crate::{ApiResult, not_found};

pub(crate) async fn wallet(Path(wallet_id): Path<String>) -> ApiResult<WalletInfo> {
    wallet_by_id(&wallet_id)
        .copied()
        .map(Json)
        .ok_or_else(|| not_found(&format!("wallet {wallet_id} not found")))
}

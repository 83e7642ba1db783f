//! VerifyGooglePurchaseHandler - Command handler for Google Play purchases.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::billing::{GooglePurchaseVerifier, PremiumGrant, VerifyError};
use crate::domain::foundation::UserId;
use crate::ports::UserStore;

/// Command to verify a purchase for the authenticated user.
#[derive(Debug, Clone)]
pub struct VerifyGooglePurchaseCommand {
    /// The authenticated caller; purchases always grant to the caller.
    pub user_id: UserId,
    /// Purchase token from the Play client.
    pub purchase_token: String,
    /// Product the token claims to cover.
    pub product_id: String,
}

/// Handler for Google Play purchase verification.
pub struct VerifyGooglePurchaseHandler {
    verifier: Arc<GooglePurchaseVerifier>,
    users: Arc<dyn UserStore>,
}

impl VerifyGooglePurchaseHandler {
    pub fn new(verifier: Arc<GooglePurchaseVerifier>, users: Arc<dyn UserStore>) -> Self {
        Self { verifier, users }
    }

    /// Verifies the purchase and applies the premium grant anchored at `now`.
    pub async fn handle(
        &self,
        cmd: VerifyGooglePurchaseCommand,
        now: DateTime<Utc>,
    ) -> Result<(), VerifyError> {
        self.verifier
            .verify(&cmd.purchase_token, &cmd.product_id)
            .await?;

        let grant = PremiumGrant::starting_at(now);
        self.users.grant_premium(&cmd.user_id, &grant, None).await?;

        tracing::info!(user_id = %cmd.user_id, "premium granted via google purchase");
        Ok(())
    }
}

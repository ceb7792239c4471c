//! WS-Trust 1.3 policy assertion (`sp:Trust13`)

use crate::namespaces::SP_NS;
use crate::policy::Assertion;

/// Options of the `sp:Trust13` assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Trust13 {
    /// `sp:MustSupportClientChallenge`
    pub must_support_client_challenge: bool,
    /// `sp:MustSupportServerChallenge`
    pub must_support_server_challenge: bool,
    /// `sp:RequireClientEntropy`
    pub require_client_entropy: bool,
    /// `sp:RequireServerEntropy`
    pub require_server_entropy: bool,
    /// `sp:MustSupportIssuedTokens`
    pub must_support_issued_tokens: bool,
    /// `sp:RequireRequestSecurityTokenCollection`
    pub require_request_security_token_collection: bool,
    /// `sp:RequireAppliesTo`
    pub require_applies_to: bool,
}

impl Trust13 {
    /// Entropy from both parties, issued tokens supported
    pub fn with_entropy() -> Self {
        Self {
            require_client_entropy: true,
            require_server_entropy: true,
            must_support_issued_tokens: true,
            ..Self::default()
        }
    }

    /// The `sp:Trust13` assertion
    pub fn to_assertion(&self) -> Assertion {
        let flags = [
            (self.must_support_client_challenge, "MustSupportClientChallenge"),
            (self.must_support_server_challenge, "MustSupportServerChallenge"),
            (self.require_client_entropy, "RequireClientEntropy"),
            (self.require_server_entropy, "RequireServerEntropy"),
            (self.must_support_issued_tokens, "MustSupportIssuedTokens"),
            (
                self.require_request_security_token_collection,
                "RequireRequestSecurityTokenCollection",
            ),
            (self.require_applies_to, "RequireAppliesTo"),
        ];
        let nested = flags
            .into_iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| Assertion::new("sp", SP_NS, name));
        Assertion::new("sp", SP_NS, "Trust13")
            .with_empty_nested_policy()
            .with_nested(nested)
    }
}

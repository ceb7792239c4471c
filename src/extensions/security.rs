//! WS-SecurityPolicy 1.2 (`sp:`)
//!
//! Security bindings, tokens and protection assertions. Every binding
//! assertion carries a nested `wsp:Policy` holding its properties, as the
//! SecurityPolicy schema requires.

use crate::namespaces::SP_NS;
use crate::policy::Assertion;

use super::trust::Trust13;

const SP: &str = "sp";

fn sp(local_name: &str) -> Assertion {
    Assertion::new(SP, SP_NS, local_name)
}

/// Wraps `inner` into `sp:<wrapper>/wsp:Policy`
fn wrapped(wrapper: &str, inner: Assertion) -> Assertion {
    sp(wrapper).with_nested([inner])
}

/// `sp:AlgorithmSuite` choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmSuite {
    /// `sp:Basic256`
    #[default]
    Basic256,
    /// `sp:Basic192`
    Basic192,
    /// `sp:Basic128`
    Basic128,
    /// `sp:TripleDes`
    TripleDes,
    /// `sp:Basic256Rsa15`
    Basic256Rsa15,
    /// `sp:Basic128Rsa15`
    Basic128Rsa15,
    /// `sp:Basic256Sha256`
    Basic256Sha256,
    /// `sp:Basic128Sha256`
    Basic128Sha256,
}

impl AlgorithmSuite {
    /// Local name of the suite assertion
    pub fn local_name(self) -> &'static str {
        match self {
            Self::Basic256 => "Basic256",
            Self::Basic192 => "Basic192",
            Self::Basic128 => "Basic128",
            Self::TripleDes => "TripleDes",
            Self::Basic256Rsa15 => "Basic256Rsa15",
            Self::Basic128Rsa15 => "Basic128Rsa15",
            Self::Basic256Sha256 => "Basic256Sha256",
            Self::Basic128Sha256 => "Basic128Sha256",
        }
    }

    fn assertion(self) -> Assertion {
        wrapped("AlgorithmSuite", sp(self.local_name()))
    }
}

/// `sp:Layout` choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `sp:Strict`
    #[default]
    Strict,
    /// `sp:Lax`
    Lax,
    /// `sp:LaxTsFirst`
    LaxTsFirst,
    /// `sp:LaxTsLast`
    LaxTsLast,
}

impl Layout {
    /// Local name of the layout assertion
    pub fn local_name(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::LaxTsFirst => "LaxTsFirst",
            Self::LaxTsLast => "LaxTsLast",
        }
    }

    fn assertion(self) -> Assertion {
        wrapped("Layout", sp(self.local_name()))
    }
}

/// `sp:IncludeToken` attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeToken {
    /// Never include the token
    Never,
    /// Include only in the first message to the recipient
    Once,
    /// Include in messages sent to the recipient
    AlwaysToRecipient,
    /// Include in messages sent to the initiator
    AlwaysToInitiator,
    /// Include in every message
    Always,
}

impl IncludeToken {
    /// Full IncludeToken URI
    pub fn uri(self) -> String {
        let suffix = match self {
            Self::Never => "Never",
            Self::Once => "Once",
            Self::AlwaysToRecipient => "AlwaysToRecipient",
            Self::AlwaysToInitiator => "AlwaysToInitiator",
            Self::Always => "Always",
        };
        format!("{}/IncludeToken/{}", SP_NS, suffix)
    }
}

/// Security tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `sp:HttpsToken`
    Https {
        /// Adds `sp:RequireClientCertificate`
        require_client_certificate: bool,
    },
    /// `sp:UsernameToken`
    Username {
        /// `sp:IncludeToken`
        include: Option<IncludeToken>,
        /// Adds `sp:HashPassword`
        hash_password: bool,
        /// Adds `sp:WssUsernameToken11` instead of `sp:WssUsernameToken10`
        wss11: bool,
    },
    /// `sp:X509Token`
    X509 {
        /// `sp:IncludeToken`
        include: Option<IncludeToken>,
        /// Profile assertion such as `WssX509V3Token10`
        profile: String,
        /// Adds `sp:RequireThumbprintReference`
        require_thumbprint_reference: bool,
    },
}

impl Token {
    /// HTTPS transport token without client certificate
    pub fn https() -> Self {
        Self::Https {
            require_client_certificate: false,
        }
    }

    /// Username token always sent to the recipient
    pub fn username() -> Self {
        Self::Username {
            include: Some(IncludeToken::AlwaysToRecipient),
            hash_password: false,
            wss11: false,
        }
    }

    /// X.509 v3 token
    pub fn x509(include: IncludeToken) -> Self {
        Self::X509 {
            include: Some(include),
            profile: "WssX509V3Token10".to_string(),
            require_thumbprint_reference: false,
        }
    }

    /// The token assertion
    pub fn to_assertion(&self) -> Assertion {
        match self {
            Self::Https {
                require_client_certificate,
            } => {
                let token = sp("HttpsToken");
                if *require_client_certificate {
                    token.with_nested([sp("RequireClientCertificate")])
                } else {
                    token.with_empty_nested_policy()
                }
            }
            Self::Username {
                include,
                hash_password,
                wss11,
            } => {
                let mut token = sp("UsernameToken");
                if let Some(include) = include {
                    token = token.with_attribute("sp:IncludeToken", include.uri());
                }
                let mut nested = Vec::new();
                if *hash_password {
                    nested.push(sp("HashPassword"));
                }
                nested.push(sp(if *wss11 {
                    "WssUsernameToken11"
                } else {
                    "WssUsernameToken10"
                }));
                token.with_nested(nested)
            }
            Self::X509 {
                include,
                profile,
                require_thumbprint_reference,
            } => {
                let mut token = sp("X509Token");
                if let Some(include) = include {
                    token = token.with_attribute("sp:IncludeToken", include.uri());
                }
                let mut nested = Vec::new();
                if *require_thumbprint_reference {
                    nested.push(sp("RequireThumbprintReference"));
                }
                nested.push(sp(profile));
                token.with_nested(nested)
            }
        }
    }
}

/// `sp:TransportBinding`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportBinding {
    token: Token,
    algorithm_suite: AlgorithmSuite,
    layout: Layout,
    include_timestamp: bool,
}

impl TransportBinding {
    /// Binding secured by `token` (usually [`Token::https`])
    pub fn new(token: Token) -> Self {
        Self {
            token,
            algorithm_suite: AlgorithmSuite::default(),
            layout: Layout::default(),
            include_timestamp: false,
        }
    }

    /// Set the algorithm suite
    pub fn algorithm_suite(mut self, suite: AlgorithmSuite) -> Self {
        self.algorithm_suite = suite;
        self
    }

    /// Set the security header layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Add `sp:IncludeTimestamp`
    pub fn include_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    /// The binding assertion
    pub fn to_assertion(&self) -> Assertion {
        let mut nested = vec![
            wrapped("TransportToken", self.token.to_assertion()),
            self.algorithm_suite.assertion(),
            self.layout.assertion(),
        ];
        if self.include_timestamp {
            nested.push(sp("IncludeTimestamp"));
        }
        sp("TransportBinding").with_nested(nested)
    }
}

/// `sp:SymmetricBinding`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricBinding {
    protection_token: Token,
    algorithm_suite: AlgorithmSuite,
    layout: Layout,
    include_timestamp: bool,
    encrypt_signature: bool,
    only_sign_entire_headers_and_body: bool,
}

impl SymmetricBinding {
    /// Binding protected by `token`
    pub fn new(protection_token: Token) -> Self {
        Self {
            protection_token,
            algorithm_suite: AlgorithmSuite::default(),
            layout: Layout::default(),
            include_timestamp: false,
            encrypt_signature: false,
            only_sign_entire_headers_and_body: false,
        }
    }

    /// Set the algorithm suite
    pub fn algorithm_suite(mut self, suite: AlgorithmSuite) -> Self {
        self.algorithm_suite = suite;
        self
    }

    /// Set the security header layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Add `sp:IncludeTimestamp`
    pub fn include_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    /// Add `sp:EncryptSignature`
    pub fn encrypt_signature(mut self, encrypt: bool) -> Self {
        self.encrypt_signature = encrypt;
        self
    }

    /// Add `sp:OnlySignEntireHeadersAndBody`
    pub fn only_sign_entire_headers_and_body(mut self, only: bool) -> Self {
        self.only_sign_entire_headers_and_body = only;
        self
    }

    /// The binding assertion
    pub fn to_assertion(&self) -> Assertion {
        let mut nested = vec![
            wrapped("ProtectionToken", self.protection_token.to_assertion()),
            self.algorithm_suite.assertion(),
            self.layout.assertion(),
        ];
        if self.include_timestamp {
            nested.push(sp("IncludeTimestamp"));
        }
        if self.encrypt_signature {
            nested.push(sp("EncryptSignature"));
        }
        if self.only_sign_entire_headers_and_body {
            nested.push(sp("OnlySignEntireHeadersAndBody"));
        }
        sp("SymmetricBinding").with_nested(nested)
    }
}

/// `sp:AsymmetricBinding`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymmetricBinding {
    initiator_token: Token,
    recipient_token: Token,
    algorithm_suite: AlgorithmSuite,
    layout: Layout,
    include_timestamp: bool,
    only_sign_entire_headers_and_body: bool,
}

impl AsymmetricBinding {
    /// Binding with separate initiator and recipient tokens
    pub fn new(initiator_token: Token, recipient_token: Token) -> Self {
        Self {
            initiator_token,
            recipient_token,
            algorithm_suite: AlgorithmSuite::default(),
            layout: Layout::default(),
            include_timestamp: false,
            only_sign_entire_headers_and_body: false,
        }
    }

    /// Set the algorithm suite
    pub fn algorithm_suite(mut self, suite: AlgorithmSuite) -> Self {
        self.algorithm_suite = suite;
        self
    }

    /// Set the security header layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Add `sp:IncludeTimestamp`
    pub fn include_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    /// Add `sp:OnlySignEntireHeadersAndBody`
    pub fn only_sign_entire_headers_and_body(mut self, only: bool) -> Self {
        self.only_sign_entire_headers_and_body = only;
        self
    }

    /// The binding assertion
    pub fn to_assertion(&self) -> Assertion {
        let mut nested = vec![
            wrapped("InitiatorToken", self.initiator_token.to_assertion()),
            wrapped("RecipientToken", self.recipient_token.to_assertion()),
            self.algorithm_suite.assertion(),
            self.layout.assertion(),
        ];
        if self.include_timestamp {
            nested.push(sp("IncludeTimestamp"));
        }
        if self.only_sign_entire_headers_and_body {
            nested.push(sp("OnlySignEntireHeadersAndBody"));
        }
        sp("AsymmetricBinding").with_nested(nested)
    }
}

/// `sp:Wss10` options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wss10 {
    /// `sp:MustSupportRefKeyIdentifier`
    pub must_support_ref_key_identifier: bool,
    /// `sp:MustSupportRefIssuerSerial`
    pub must_support_ref_issuer_serial: bool,
}

impl Wss10 {
    /// The `sp:Wss10` assertion
    pub fn to_assertion(&self) -> Assertion {
        let mut nested = Vec::new();
        if self.must_support_ref_key_identifier {
            nested.push(sp("MustSupportRefKeyIdentifier"));
        }
        if self.must_support_ref_issuer_serial {
            nested.push(sp("MustSupportRefIssuerSerial"));
        }
        sp("Wss10").with_empty_nested_policy().with_nested(nested)
    }
}

/// `sp:Wss11` options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wss11 {
    /// `sp:MustSupportRefKeyIdentifier`
    pub must_support_ref_key_identifier: bool,
    /// `sp:MustSupportRefIssuerSerial`
    pub must_support_ref_issuer_serial: bool,
    /// `sp:MustSupportRefThumbprint`
    pub must_support_ref_thumbprint: bool,
    /// `sp:MustSupportRefEncryptedKey`
    pub must_support_ref_encrypted_key: bool,
    /// `sp:RequireSignatureConfirmation`
    pub require_signature_confirmation: bool,
}

impl Wss11 {
    /// The `sp:Wss11` assertion
    pub fn to_assertion(&self) -> Assertion {
        let flags = [
            (self.must_support_ref_key_identifier, "MustSupportRefKeyIdentifier"),
            (self.must_support_ref_issuer_serial, "MustSupportRefIssuerSerial"),
            (self.must_support_ref_thumbprint, "MustSupportRefThumbprint"),
            (self.must_support_ref_encrypted_key, "MustSupportRefEncryptedKey"),
            (self.require_signature_confirmation, "RequireSignatureConfirmation"),
        ];
        let nested = flags
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| sp(name));
        sp("Wss11").with_empty_nested_policy().with_nested(nested)
    }
}

/// Body and header selection for `sp:SignedParts` / `sp:EncryptedParts`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageParts {
    body: bool,
    headers: Vec<(Option<String>, String)>,
}

impl MessageParts {
    /// Select the SOAP body
    pub fn body() -> Self {
        Self {
            body: true,
            headers: Vec::new(),
        }
    }

    /// Add a header by namespace and optional local name
    pub fn header(mut self, name: Option<&str>, namespace: impl Into<String>) -> Self {
        self.headers.push((name.map(String::from), namespace.into()));
        self
    }

    fn to_assertion(&self, local_name: &str) -> Assertion {
        let mut parts = sp(local_name);
        if self.body {
            parts = parts.with_child(sp("Body"));
        }
        for (name, namespace) in &self.headers {
            let mut header = sp("Header");
            if let Some(name) = name {
                header = header.with_attribute("Name", name.as_str());
            }
            parts = parts.with_child(header.with_attribute("Namespace", namespace.as_str()));
        }
        parts
    }
}

/// Collects a security policy's assertions in the conventional order:
/// binding, supporting tokens, WSS options, Trust, then protection parts.
#[derive(Debug, Clone, Default)]
pub struct SecurityPolicy {
    binding: Option<Assertion>,
    supporting_tokens: Vec<Assertion>,
    wss: Vec<Assertion>,
    trust: Option<Assertion>,
    parts: Vec<Assertion>,
}

impl SecurityPolicy {
    /// Empty policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a transport binding
    pub fn transport_binding(mut self, binding: TransportBinding) -> Self {
        self.binding = Some(binding.to_assertion());
        self
    }

    /// Use a symmetric binding
    pub fn symmetric_binding(mut self, binding: SymmetricBinding) -> Self {
        self.binding = Some(binding.to_assertion());
        self
    }

    /// Use an asymmetric binding
    pub fn asymmetric_binding(mut self, binding: AsymmetricBinding) -> Self {
        self.binding = Some(binding.to_assertion());
        self
    }

    /// `sp:SupportingTokens`
    pub fn supporting_tokens<I: IntoIterator<Item = Token>>(self, tokens: I) -> Self {
        self.tokens("SupportingTokens", tokens)
    }

    /// `sp:SignedSupportingTokens`
    pub fn signed_supporting_tokens<I: IntoIterator<Item = Token>>(self, tokens: I) -> Self {
        self.tokens("SignedSupportingTokens", tokens)
    }

    /// `sp:EndorsingSupportingTokens`
    pub fn endorsing_supporting_tokens<I: IntoIterator<Item = Token>>(self, tokens: I) -> Self {
        self.tokens("EndorsingSupportingTokens", tokens)
    }

    fn tokens<I: IntoIterator<Item = Token>>(mut self, local_name: &str, tokens: I) -> Self {
        let nested = tokens.into_iter().map(|t| t.to_assertion());
        self.supporting_tokens.push(sp(local_name).with_nested(nested));
        self
    }

    /// `sp:Wss10`
    pub fn wss10(mut self, options: Wss10) -> Self {
        self.wss.push(options.to_assertion());
        self
    }

    /// `sp:Wss11`
    pub fn wss11(mut self, options: Wss11) -> Self {
        self.wss.push(options.to_assertion());
        self
    }

    /// `sp:Trust13`
    pub fn trust(mut self, trust: Trust13) -> Self {
        self.trust = Some(trust.to_assertion());
        self
    }

    /// `sp:SignedParts`
    pub fn signed_parts(mut self, parts: MessageParts) -> Self {
        self.parts.push(parts.to_assertion("SignedParts"));
        self
    }

    /// `sp:EncryptedParts`
    pub fn encrypted_parts(mut self, parts: MessageParts) -> Self {
        self.parts.push(parts.to_assertion("EncryptedParts"));
        self
    }

    /// The collected assertions
    pub fn build(self) -> Vec<Assertion> {
        let mut assertions: Vec<Assertion> = self.binding.into_iter().collect();
        assertions.extend(self.supporting_tokens);
        assertions.extend(self.wss);
        assertions.extend(self.trust);
        assertions.extend(self.parts);
        assertions
    }
}

//! Universal Profile resolution.
//!
//! [`ProfileResolver`] walks the chain from an address to a display name and
//! avatar:
//!
//! 1. ERC725Y `getData(LSP3Profile)` on the account
//! 2. decode the value into a [`ProfilePointer`]
//! 3. fetch (or inline-decode) the JSON document it points at
//! 4. extract the profile fields and normalize the avatar URL
//!
//! Every step returns a [`ResolveError`] internally. The public
//! [`ProfileResolver::resolve`] absorbs it into an empty [`ResolvedProfile`]
//! whose status says what went wrong.

use alloy_primitives::{Address, Bytes};
use alloy_provider::{Provider, RootProvider};
use lsp3::chain::{ChainId, parse_address};
use lsp3::config::ResolverConfig;
use lsp3::pointer::{MetadataSource, ProfilePointer, Verification};
use lsp3::profile::{Lsp3Profile, ResolutionStatus, ResolvedProfile};
use serde_json::Value;
use url::Url;

use crate::contract::IERC725Y;
use crate::error::{ResolveError, ResolverBuildError};
use crate::fetch::MetadataFetcher;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Resolves LSP3 profiles for accounts on the configured chain.
///
/// Calls are independent: no caching, no retries, no shared mutable state.
#[derive(Debug, Clone)]
pub struct ProfileResolver<P = RootProvider> {
    config: ResolverConfig,
    provider: P,
    fetcher: MetadataFetcher,
}

impl ProfileResolver<RootProvider> {
    /// Creates a resolver talking HTTP JSON-RPC to `config.rpc_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverBuildError`] if the RPC URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ResolverConfig) -> Result<Self, ResolverBuildError> {
        let rpc_url: Url = config
            .rpc_url
            .parse()
            .map_err(|source| ResolverBuildError::RpcUrl {
                url: config.rpc_url.clone(),
                source,
            })?;
        #[cfg(feature = "telemetry")]
        tracing::info!(chain = config.supported_chain, rpc_url = %rpc_url, "Using HTTP transport");
        let provider = RootProvider::new_http(rpc_url);
        Self::with_provider(config, provider)
    }
}

impl<P: Provider> ProfileResolver<P> {
    /// Creates a resolver on top of an existing provider.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverBuildError::HttpClient`] if the HTTP client cannot
    /// be built.
    pub fn with_provider(config: ResolverConfig, provider: P) -> Result<Self, ResolverBuildError> {
        let client = reqwest::Client::builder().build()?;
        let fetcher = MetadataFetcher::new(client).with_timeout(config.fetch_timeout);
        Ok(Self {
            config,
            provider,
            fetcher,
        })
    }

    /// Replaces the HTTP client used for document fetches.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.fetcher = MetadataFetcher::new(client).with_timeout(self.config.fetch_timeout);
        self
    }

    /// Returns the resolver configuration.
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the document fetcher.
    pub const fn fetcher(&self) -> &MetadataFetcher {
        &self.fetcher
    }

    /// Returns the underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves the profile of `address` as seen on `chain`.
    ///
    /// Never fails. Unsupported chains and malformed addresses return an
    /// empty [`ResolutionStatus::Unsupported`] result without any I/O; every
    /// other failure returns an empty result carrying the matching status.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "lsp3.resolve", skip(self), fields(status))
    )]
    pub async fn resolve(&self, address: &str, chain: ChainId) -> ResolvedProfile {
        if chain != self.config.supported_chain {
            #[cfg(feature = "telemetry")]
            tracing::debug!(supported = self.config.supported_chain, "Chain does not support profiles");
            return ResolvedProfile::empty(address, ResolutionStatus::Unsupported);
        }
        let parsed = match parse_address(address) {
            Ok(parsed) => parsed,
            #[allow(unused_variables)]
            Err(e) => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(error = %e, "Skipping resolution");
                return ResolvedProfile::empty(address, ResolutionStatus::Unsupported);
            }
        };

        let resolved = match self.try_resolve(parsed).await {
            Ok(profile) => ResolvedProfile::from_profile(address, &profile, &self.config),
            Err(e) => {
                #[cfg(feature = "telemetry")]
                tracing::warn!(error = %e, "Profile resolution failed");
                ResolvedProfile::empty(address, e.status())
            }
        };
        #[cfg(feature = "telemetry")]
        tracing::Span::current().record("status", tracing::field::display(resolved.status));
        resolved
    }

    /// Resolves the profile fields of `address`, surfacing the first failure.
    ///
    /// Does not check the chain; the caller is expected to have done so.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] describing the failing step.
    pub async fn try_resolve(&self, address: Address) -> Result<Lsp3Profile, ResolveError> {
        let raw = self.read_pointer(address).await?;
        let pointer = ProfilePointer::decode(&raw)?;
        let source = pointer.source(&self.config)?.ok_or(ResolveError::NotFound)?;
        let document = self.load_document(source).await?;
        Ok(Lsp3Profile::from_document(&document))
    }

    /// Reads the raw profile pointer from the account's ERC725Y store.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ChainRead`] on RPC failure and
    /// [`ResolveError::NoContract`] when the call returns no data at all.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "lsp3.read_pointer", skip(self), err)
    )]
    pub async fn read_pointer(&self, address: Address) -> Result<Bytes, ResolveError> {
        let store = IERC725Y::new(address, &self.provider);
        match store.getData(self.config.profile_key).call().await {
            Ok(value) => Ok(value),
            Err(alloy_contract::Error::ZeroData(..)) => Err(ResolveError::NoContract(address)),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_document(&self, source: MetadataSource) -> Result<Value, ResolveError> {
        let (content, verification, origin) = match source {
            MetadataSource::Inline(document) => return Ok(document),
            MetadataSource::Embedded {
                content,
                verification,
            } => (content, verification, "data: url".to_owned()),
            MetadataSource::Remote { url, verification } => {
                #[cfg(feature = "telemetry")]
                tracing::debug!(url = %url, "Fetching profile document");
                (self.fetcher.fetch(&url).await?, verification, url)
            }
        };
        if self.config.verify_content_hash {
            if let Some(verification) = &verification {
                check_hash(verification, &content, &origin)?;
            }
        }
        Ok(serde_json::from_slice(strip_bom(&content))?)
    }
}

fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

fn check_hash(verification: &Verification, content: &[u8], origin: &str) -> Result<(), ResolveError> {
    match verification.check(content) {
        Some(true) => Ok(()),
        Some(false) => Err(ResolveError::HashMismatch(origin.to_owned())),
        None => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(method = %verification.method, "Cannot verify content hash");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;
    use serde_json::json;
    use std::time::Duration;

    use reqwest::header::{HeaderMap, HeaderValue};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_support::{RpcFailure, mount_get_data, verifiable_uri};

    const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    struct Harness {
        rpc: MockServer,
        ipfs: MockServer,
    }

    impl Harness {
        async fn start() -> Self {
            Self {
                rpc: MockServer::start().await,
                ipfs: MockServer::start().await,
            }
        }

        fn config(&self) -> ResolverConfig {
            ResolverConfig::default()
                .with_rpc_url(self.rpc.uri())
                .with_ipfs_gateway(self.ipfs.uri())
        }

        fn resolver(&self) -> ProfileResolver {
            ProfileResolver::new(self.config()).unwrap()
        }

        async fn serve_document(&self, cid: &str, body: ResponseTemplate) {
            Mock::given(method("GET"))
                .and(path(format!("/ipfs/{cid}")))
                .respond_with(body)
                .expect(1)
                .mount(&self.ipfs)
                .await;
        }

        async fn assert_untouched(&self) {
            assert!(self.rpc.received_requests().await.unwrap().is_empty());
            assert!(self.ipfs.received_requests().await.unwrap().is_empty());
        }

        async fn expect_no_fetch(&self) {
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&self.ipfs)
                .await;
        }
    }

    fn alice_document() -> Value {
        json!({
            "LSP3Profile": {
                "name": "Alice",
                "profileImage": [{"url": "ipfs://QmXYZ", "width": 640, "height": 640}]
            }
        })
    }

    #[tokio::test]
    async fn test_unsupported_chain_makes_no_calls() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, b"", 0).await;
        h.expect_no_fetch().await;

        let profile = h.resolver().resolve(ALICE, 1).await;
        assert_eq!(profile, ResolvedProfile::empty(ALICE, ResolutionStatus::Unsupported));
        h.assert_untouched().await;
    }

    #[tokio::test]
    async fn test_malformed_address_makes_no_calls() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, b"", 0).await;
        h.expect_no_fetch().await;

        let resolver = h.resolver();
        for bad in ["", "0x123", "alice.lyx", "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"] {
            let profile = resolver.resolve(bad, 42).await;
            assert_eq!(profile.status, ResolutionStatus::Unsupported);
            assert!(profile.is_empty());
            assert_eq!(profile.address, bad);
        }
        h.assert_untouched().await;
    }

    #[tokio::test]
    async fn test_empty_pointer_skips_fetch() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, b"", 1).await;
        h.expect_no_fetch().await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile, ResolvedProfile::empty(ALICE, ResolutionStatus::NotFound));
    }

    #[tokio::test]
    async fn test_verifiable_uri_resolves_through_gateway() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, &verifiable_uri(&[0xaa; 32], "ipfs://QmABC"), 1).await;
        h.serve_document("QmABC", ResponseTemplate::new(200).set_body_json(alice_document()))
            .await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile.status, ResolutionStatus::Ok);
        assert_eq!(profile.address, ALICE);
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
        assert_eq!(
            profile.avatar_url,
            Some(format!("{}/ipfs/QmXYZ", h.ipfs.uri()))
        );
    }

    #[tokio::test]
    async fn test_plain_url_pointer_and_bare_string_image() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, b"ipfs://QmPlain", 1).await;
        h.serve_document(
            "QmPlain",
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Bob", "profileImage": "https://host/pic.png"})),
        )
        .await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile.display_name.as_deref(), Some("Bob"));
        assert_eq!(profile.avatar_url.as_deref(), Some("https://host/pic.png"));
    }

    #[tokio::test]
    async fn test_inline_document_pointer() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, br#"{"LSP3Profile":{"name":"Dana"}}"#, 1).await;
        h.expect_no_fetch().await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile.status, ResolutionStatus::Ok);
        assert_eq!(profile.display_name.as_deref(), Some("Dana"));
        assert_eq!(profile.avatar_url, None);
    }

    #[tokio::test]
    async fn test_http_404_yields_empty_profile() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, &verifiable_uri(&[0; 32], "ipfs://QmGone"), 1).await;
        h.serve_document("QmGone", ResponseTemplate::new(404)).await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile, ResolvedProfile::empty(ALICE, ResolutionStatus::FetchError));
    }

    #[tokio::test]
    async fn test_unparseable_document_yields_empty_profile() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, &verifiable_uri(&[0; 32], "ipfs://QmJunk"), 1).await;
        h.serve_document("QmJunk", ResponseTemplate::new(200).set_body_string("<html>nope"))
            .await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile, ResolvedProfile::empty(ALICE, ResolutionStatus::ParseError));
    }

    #[tokio::test]
    async fn test_rpc_error_yields_empty_profile() {
        let h = Harness::start().await;
        Mock::given(method("POST"))
            .respond_with(RpcFailure)
            .expect(1)
            .mount(&h.rpc)
            .await;
        h.expect_no_fetch().await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile, ResolvedProfile::empty(ALICE, ResolutionStatus::ChainReadError));
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, &verifiable_uri(&[0; 32], "ipfs://QmTwice"), 2).await;
        Mock::given(method("GET"))
            .and(path("/ipfs/QmTwice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice_document()))
            .expect(2)
            .mount(&h.ipfs)
            .await;

        let resolver = h.resolver();
        let first = resolver.resolve(ALICE, 42).await;
        let second = resolver.resolve(ALICE, 42).await;
        assert_eq!(first, second);
        assert_eq!(first.status, ResolutionStatus::Ok);
    }

    #[tokio::test]
    async fn test_hash_verification() {
        let body = serde_json::to_vec(&alice_document()).unwrap();
        let good = keccak256(&body);

        let h = Harness::start().await;
        mount_get_data(&h.rpc, &verifiable_uri(good.as_slice(), "ipfs://QmHashed"), 1).await;
        h.serve_document("QmHashed", ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .await;
        let resolver = ProfileResolver::new(h.config().with_hash_verification(true)).unwrap();
        let profile = resolver.resolve(ALICE, 42).await;
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));

        let h = Harness::start().await;
        mount_get_data(&h.rpc, &verifiable_uri(&[0x11; 32], "ipfs://QmHashed"), 1).await;
        h.serve_document("QmHashed", ResponseTemplate::new(200).set_body_bytes(body))
            .await;
        let resolver = ProfileResolver::new(h.config().with_hash_verification(true)).unwrap();
        let profile = resolver.resolve(ALICE, 42).await;
        assert_eq!(profile, ResolvedProfile::empty(ALICE, ResolutionStatus::HashMismatch));
    }

    #[tokio::test]
    async fn test_data_url_pointer_is_decoded_inline() {
        let h = Harness::start().await;
        let pointer = verifiable_uri(&[0; 32], "data:application/json;base64,eyJuYW1lIjoiQ2FyIn0=");
        mount_get_data(&h.rpc, &pointer, 1).await;
        h.expect_no_fetch().await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile.display_name.as_deref(), Some("Car"));
    }

    #[tokio::test]
    async fn test_document_with_byte_order_mark() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, &verifiable_uri(&[0; 32], "ipfs://QmBom"), 1).await;
        let mut body = UTF8_BOM.to_vec();
        body.extend_from_slice(&serde_json::to_vec(&alice_document()).unwrap());
        h.serve_document("QmBom", ResponseTemplate::new(200).set_body_bytes(body))
            .await;

        let profile = h.resolver().resolve(ALICE, 42).await;
        assert_eq!(profile.status, ResolutionStatus::Ok);
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_custom_http_client_is_used_for_documents() {
        let h = Harness::start().await;
        mount_get_data(&h.rpc, b"ipfs://QmCustom", 1).await;
        Mock::given(method("GET"))
            .and(path("/ipfs/QmCustom"))
            .and(header("x-client", "lsp3-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice_document()))
            .expect(1)
            .mount(&h.ipfs)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-client", HeaderValue::from_static("lsp3-test"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap();
        let resolver = ProfileResolver::new(h.config().with_fetch_timeout(Duration::from_secs(5)))
            .unwrap()
            .with_http_client(client);
        assert_eq!(resolver.fetcher().timeout(), Some(Duration::from_secs(5)));

        let profile = resolver.resolve(ALICE, 42).await;
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_fetch_timeout_follows_config() {
        let config = ResolverConfig::default().with_fetch_timeout(Duration::from_millis(750));
        let resolver = ProfileResolver::new(config).unwrap();
        assert_eq!(resolver.fetcher().timeout(), Some(Duration::from_millis(750)));
        let resolver = ProfileResolver::new(ResolverConfig::default()).unwrap();
        assert_eq!(resolver.fetcher().timeout(), None);
    }

    #[test]
    fn test_invalid_rpc_url_is_rejected() {
        let err = ProfileResolver::new(ResolverConfig::default().with_rpc_url("not a url")).unwrap_err();
        assert!(matches!(err, ResolverBuildError::RpcUrl { .. }));
    }
}

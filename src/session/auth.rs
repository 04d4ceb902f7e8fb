//! Credential configuration.
//!
//! [`Auth`] describes how a session authenticates: a community string for
//! SNMPv1/v2c, or a USM user for SNMPv3. The engine receives the resolved
//! [`SecurityContext`] with every call.
//!
//! ```rust
//! use snmp_table::{Auth, AuthProtocol, PrivProtocol, SecurityLevel};
//!
//! let auth: Auth = Auth::usm("monitor")
//!     .auth(AuthProtocol::Sha1, "authpass")
//!     .privacy(PrivProtocol::Aes128, "privpass")
//!     .into();
//! assert_eq!(auth.security_context().security_level(), SecurityLevel::AuthPriv);
//!
//! // An empty key disables that layer.
//! let auth: Auth = Auth::usm("monitor")
//!     .auth(AuthProtocol::Sha1, "authpass")
//!     .privacy(PrivProtocol::Aes128, "")
//!     .into();
//! assert_eq!(auth.security_context().security_level(), SecurityLevel::AuthNoPriv);
//! ```

use crate::error::{Error, Result};

/// Error returned when a protocol name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProtocolError {
    input: String,
    kind: ProtocolKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProtocolKind {
    Auth,
    Priv,
}

impl std::fmt::Display for ParseProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ProtocolKind::Auth => write!(
                f,
                "unknown authentication protocol '{}'; expected one of: noauth, md5, sha",
                self.input
            ),
            ProtocolKind::Priv => write!(
                f,
                "unknown privacy protocol '{}'; expected one of: nopriv, des, 3des, aes128, aes192, aes256",
                self.input
            ),
        }
    }
}

impl std::error::Error for ParseProtocolError {}

/// Authentication protocol identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuthProtocol {
    /// No authentication.
    NoAuth,
    /// HMAC-MD5-96 (RFC 3414)
    Md5,
    /// HMAC-SHA-96 (RFC 3414)
    Sha1,
}

impl std::fmt::Display for AuthProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAuth => write!(f, "noauth"),
            Self::Md5 => write!(f, "md5"),
            Self::Sha1 => write!(f, "sha"),
        }
    }
}

impl std::str::FromStr for AuthProtocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "noauth" => Ok(Self::NoAuth),
            "md5" => Ok(Self::Md5),
            "sha" | "sha1" | "sha-1" => Ok(Self::Sha1),
            _ => Err(ParseProtocolError {
                input: s.to_string(),
                kind: ProtocolKind::Auth,
            }),
        }
    }
}

/// Privacy protocol identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrivProtocol {
    /// No encryption.
    NoPriv,
    /// CBC-DES (RFC 3414)
    Des,
    /// 3DES-EDE (draft-reeder-snmpv3-usm-3desede)
    TripleDes,
    /// CFB128-AES-128 (RFC 3826)
    Aes128,
    /// CFB128-AES-192
    Aes192,
    /// CFB128-AES-256
    Aes256,
}

impl std::fmt::Display for PrivProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPriv => write!(f, "nopriv"),
            Self::Des => write!(f, "des"),
            Self::TripleDes => write!(f, "3des"),
            Self::Aes128 => write!(f, "aes128"),
            Self::Aes192 => write!(f, "aes192"),
            Self::Aes256 => write!(f, "aes256"),
        }
    }
}

impl std::str::FromStr for PrivProtocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nopriv" => Ok(Self::NoPriv),
            "des" => Ok(Self::Des),
            "3des" => Ok(Self::TripleDes),
            "aes" | "aes128" | "aes-128" => Ok(Self::Aes128),
            "aes192" | "aes-192" => Ok(Self::Aes192),
            "aes256" | "aes-256" => Ok(Self::Aes256),
            _ => Err(ParseProtocolError {
                input: s.to_string(),
                kind: ProtocolKind::Priv,
            }),
        }
    }
}

/// SNMP version for community-based authentication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommunityVersion {
    /// SNMPv1
    V1,
    /// SNMPv2c
    #[default]
    V2c,
}

/// Authentication configuration for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Auth {
    /// Community string authentication (SNMPv1 or v2c).
    Community {
        /// SNMP version (V1 or V2c)
        #[cfg_attr(feature = "serde", serde(default))]
        version: CommunityVersion,
        /// Community string
        community: String,
    },
    /// User-based Security Model (SNMPv3).
    Usm(UsmAuth),
}

impl Default for Auth {
    fn default() -> Self {
        Auth::v2c("public")
    }
}

impl Auth {
    /// SNMPv1 community authentication.
    pub fn v1(community: impl Into<String>) -> Self {
        Auth::Community {
            version: CommunityVersion::V1,
            community: community.into(),
        }
    }

    /// SNMPv2c community authentication.
    ///
    /// `Auth::default()` is `Auth::v2c("public")`.
    pub fn v2c(community: impl Into<String>) -> Self {
        Auth::Community {
            version: CommunityVersion::V2c,
            community: community.into(),
        }
    }

    /// Start building SNMPv3 USM authentication.
    pub fn usm(username: impl Into<String>) -> UsmBuilder {
        UsmBuilder::new(username)
    }

    /// Select credentials by numeric SNMP version.
    ///
    /// `1` uses `community` with SNMPv1, `3` uses the USM user, and any other
    /// value falls back to SNMPv2c with `community`.
    ///
    /// ```rust
    /// use snmp_table::{Auth, AuthProtocol};
    ///
    /// let user = Auth::usm("monitor").auth(AuthProtocol::Md5, "secret");
    /// assert_eq!(Auth::from_version(1, "public", user.clone()), Auth::v1("public"));
    /// assert_eq!(Auth::from_version(7, "public", user.clone()), Auth::v2c("public"));
    /// assert!(matches!(Auth::from_version(3, "public", user), Auth::Usm(_)));
    /// ```
    pub fn from_version(version: u8, community: impl Into<String>, usm: UsmBuilder) -> Self {
        match version {
            1 => Auth::v1(community),
            3 => usm.into(),
            _ => Auth::v2c(community),
        }
    }

    /// Resolve into the context handed to the engine.
    ///
    /// For USM, an empty key (or the `NoAuth`/`NoPriv` protocol) disables that
    /// layer.
    pub fn security_context(&self) -> SecurityContext {
        match self {
            Auth::Community { version, community } => SecurityContext::Community {
                version: *version,
                community: community.clone(),
            },
            Auth::Usm(usm) => SecurityContext::Usm {
                username: usm.username.clone(),
                auth: effective(usm.auth_protocol, &usm.auth_key, AuthProtocol::NoAuth),
                privacy: effective(usm.priv_protocol, &usm.priv_key, PrivProtocol::NoPriv),
            },
        }
    }

    /// Reject credentials no engine could use.
    pub fn validate(&self) -> Result<()> {
        if let Auth::Usm(usm) = self {
            if usm.username.is_empty() {
                return Err(Error::Config("USM username is empty".into()).boxed());
            }
            if let SecurityContext::Usm {
                auth: None,
                privacy: Some(_),
                ..
            } = self.security_context()
            {
                return Err(
                    Error::Config("privacy requires authentication to be enabled".into()).boxed(),
                );
            }
        }
        Ok(())
    }
}

fn effective<P: Copy + PartialEq>(
    protocol: Option<P>,
    key: &Option<String>,
    disabled: P,
) -> Option<(P, String)> {
    match (protocol, key) {
        (Some(p), Some(k)) if p != disabled && !k.is_empty() => Some((p, k.clone())),
        _ => None,
    }
}

/// SNMPv3 USM authentication parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsmAuth {
    /// SNMPv3 username
    pub username: String,
    /// Authentication protocol
    #[cfg_attr(feature = "serde", serde(default))]
    pub auth_protocol: Option<AuthProtocol>,
    /// Authentication key (passphrase)
    #[cfg_attr(feature = "serde", serde(default))]
    pub auth_key: Option<String>,
    /// Privacy protocol
    #[cfg_attr(feature = "serde", serde(default))]
    pub priv_protocol: Option<PrivProtocol>,
    /// Privacy key (passphrase)
    #[cfg_attr(feature = "serde", serde(default))]
    pub priv_key: Option<String>,
}

/// Builder for SNMPv3 USM authentication.
#[derive(Debug, Clone)]
pub struct UsmBuilder {
    username: String,
    auth: Option<(AuthProtocol, String)>,
    privacy: Option<(PrivProtocol, String)>,
}

impl UsmBuilder {
    /// Create a new USM builder with the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            auth: None,
            privacy: None,
        }
    }

    /// Add authentication (authNoPriv or authPriv).
    pub fn auth(mut self, protocol: AuthProtocol, key: impl Into<String>) -> Self {
        self.auth = Some((protocol, key.into()));
        self
    }

    /// Add privacy (authPriv). Requires authentication; checked by
    /// [`Auth::validate`].
    pub fn privacy(mut self, protocol: PrivProtocol, key: impl Into<String>) -> Self {
        self.privacy = Some((protocol, key.into()));
        self
    }
}

impl From<UsmBuilder> for Auth {
    fn from(b: UsmBuilder) -> Auth {
        let (auth_protocol, auth_key) = b.auth.unzip();
        let (priv_protocol, priv_key) = b.privacy.unzip();
        Auth::Usm(UsmAuth {
            username: b.username,
            auth_protocol,
            auth_key,
            priv_protocol,
            priv_key,
        })
    }
}

/// SNMPv3 security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityLevel {
    NoAuthNoPriv,
    AuthNoPriv,
    AuthPriv,
}

/// Resolved security parameters passed to the engine with every call.
///
/// The session never interprets this; it is built once from [`Auth`].
#[derive(Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SecurityContext {
    /// SNMPv1/v2c community.
    Community {
        version: CommunityVersion,
        community: String,
    },
    /// SNMPv3 user with the layers that are actually enabled.
    Usm {
        username: String,
        auth: Option<(AuthProtocol, String)>,
        privacy: Option<(PrivProtocol, String)>,
    },
}

impl SecurityContext {
    /// Security level implied by the enabled layers.
    ///
    /// Community contexts report `NoAuthNoPriv`.
    pub fn security_level(&self) -> SecurityLevel {
        match self {
            SecurityContext::Usm {
                auth: Some(_),
                privacy: Some(_),
                ..
            } => SecurityLevel::AuthPriv,
            SecurityContext::Usm { auth: Some(_), .. } => SecurityLevel::AuthNoPriv,
            _ => SecurityLevel::NoAuthNoPriv,
        }
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityContext::Community { version, .. } => f
                .debug_struct("Community")
                .field("version", version)
                .finish_non_exhaustive(),
            SecurityContext::Usm {
                username,
                auth,
                privacy,
            } => f
                .debug_struct("Usm")
                .field("username", username)
                .field("auth", &auth.as_ref().map(|(p, _)| p))
                .field("privacy", &privacy.as_ref().map(|(p, _)| p))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_parsing() {
        assert_eq!("md5".parse::<AuthProtocol>().unwrap(), AuthProtocol::Md5);
        assert_eq!("SHA".parse::<AuthProtocol>().unwrap(), AuthProtocol::Sha1);
        assert_eq!("noauth".parse::<AuthProtocol>().unwrap(), AuthProtocol::NoAuth);
        assert_eq!("3des".parse::<PrivProtocol>().unwrap(), PrivProtocol::TripleDes);
        assert_eq!("aes256".parse::<PrivProtocol>().unwrap(), PrivProtocol::Aes256);
        assert_eq!("nopriv".parse::<PrivProtocol>().unwrap(), PrivProtocol::NoPriv);

        let err = "sha512".parse::<AuthProtocol>().unwrap_err();
        assert!(err.to_string().contains("sha512"));
        assert!("blowfish".parse::<PrivProtocol>().is_err());
    }

    #[test]
    fn test_protocol_display_roundtrip() {
        for p in [AuthProtocol::NoAuth, AuthProtocol::Md5, AuthProtocol::Sha1] {
            assert_eq!(p.to_string().parse::<AuthProtocol>().unwrap(), p);
        }
        for p in [
            PrivProtocol::NoPriv,
            PrivProtocol::Des,
            PrivProtocol::TripleDes,
            PrivProtocol::Aes128,
            PrivProtocol::Aes192,
            PrivProtocol::Aes256,
        ] {
            assert_eq!(p.to_string().parse::<PrivProtocol>().unwrap(), p);
        }
    }

    #[test]
    fn test_community_context() {
        let ctx = Auth::v1("private").security_context();
        assert_eq!(
            ctx,
            SecurityContext::Community {
                version: CommunityVersion::V1,
                community: "private".into()
            }
        );
        assert_eq!(ctx.security_level(), SecurityLevel::NoAuthNoPriv);
    }

    #[test]
    fn test_empty_keys_disable_layers() {
        let auth: Auth = Auth::usm("u")
            .auth(AuthProtocol::Md5, "")
            .privacy(PrivProtocol::Des, "")
            .into();
        assert_eq!(
            auth.security_context(),
            SecurityContext::Usm {
                username: "u".into(),
                auth: None,
                privacy: None
            }
        );

        let auth: Auth = Auth::usm("u").auth(AuthProtocol::NoAuth, "key").into();
        assert_eq!(auth.security_context().security_level(), SecurityLevel::NoAuthNoPriv);
    }

    #[test]
    fn test_validate() {
        assert!(Auth::default().validate().is_ok());

        let auth: Auth = Auth::usm("u").privacy(PrivProtocol::Aes128, "p").into();
        let err = auth.validate().unwrap_err();
        assert!(matches!(*err, Error::Config(_)));

        let auth: Auth = Auth::usm("").into();
        assert!(auth.validate().is_err());

        let auth: Auth = Auth::usm("u")
            .auth(AuthProtocol::Sha1, "a")
            .privacy(PrivProtocol::Aes128, "p")
            .into();
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_keys() {
        let auth: Auth = Auth::usm("admin")
            .auth(AuthProtocol::Sha1, "s3cret-auth")
            .privacy(PrivProtocol::Aes128, "s3cret-priv")
            .into();
        let debug = format!("{:?}", auth.security_context());
        assert!(debug.contains("admin"));
        assert!(!debug.contains("s3cret"));

        let debug = format!("{:?}", Auth::v2c("hush").security_context());
        assert!(!debug.contains("hush"));
    }
}

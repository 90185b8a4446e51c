use crate::error::{ClientError, ClientResult};
use crate::models::Authentication;

/// Credential kinds understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsKind {
    Basic,
    Ntlm,
    Kerberos,
}

impl CredentialsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Ntlm => "NTLM",
            Self::Kerberos => "SPNEGO/Kerberos",
        }
    }
}

/// A credential specification: the kind plus its fields. `build` runs the
/// kind's validation and produces the wire payload.
#[derive(Debug, Clone)]
pub struct CredentialsSpec {
    kind: CredentialsKind,
    username: String,
    password: String,
    domain: Option<String>,
}

impl CredentialsSpec {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            kind: CredentialsKind::Basic,
            username: username.into(),
            password: password.into(),
            domain: None,
        }
    }

    pub fn ntlm(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            kind: CredentialsKind::Ntlm,
            username: username.into(),
            password: password.into(),
            domain: None,
        }
    }

    pub fn kerberos(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            kind: CredentialsKind::Kerberos,
            username: username.into(),
            password: password.into(),
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn kind(&self) -> CredentialsKind {
        self.kind
    }

    /// Validate the spec and produce the credential payload
    pub fn build(self) -> ClientResult<Authentication> {
        validate(&self)?;
        Ok(Authentication {
            auth_type: self.kind.as_str().to_string(),
            username: self.username,
            password: self.password,
            domain: self.domain,
        })
    }
}

/// Per-kind validation rules. Domain-based schemes require both username and
/// password; basic credentials are passed through as given.
fn validate(spec: &CredentialsSpec) -> ClientResult<()> {
    match spec.kind {
        CredentialsKind::Basic => Ok(()),
        CredentialsKind::Ntlm => {
            validate_not_empty(
                &spec.username,
                "Missing username, it's a required parameter for NTLM Auth.",
            )?;
            validate_not_empty(
                &spec.password,
                "Missing password, it's a required parameter for NTLM Auth.",
            )
        }
        CredentialsKind::Kerberos => {
            validate_not_empty(
                &spec.username,
                "Missing username, it's a required parameter for Kerberos Auth.",
            )?;
            validate_not_empty(
                &spec.password,
                "Missing password, it's a required parameter for Kerberos Auth.",
            )
        }
    }
}

fn validate_not_empty(value: &str, message: &str) -> ClientResult<()> {
    if value.is_empty() {
        return Err(ClientError::Validation(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ntlm_requires_password() {
        let result = CredentialsSpec::ntlm("user", "").build();
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_ntlm_requires_username() {
        let result = CredentialsSpec::ntlm("", "password").build();
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_ntlm_with_both_fields() {
        let auth = CredentialsSpec::ntlm("user", "password")
            .with_domain("CORP")
            .build()
            .unwrap();
        assert_eq!(auth.auth_type, "NTLM");
        assert_eq!(auth.username, "user");
        assert_eq!(auth.domain.as_deref(), Some("CORP"));
    }

    #[test]
    fn test_basic_is_not_validated() {
        let auth = CredentialsSpec::basic("", "").build().unwrap();
        assert_eq!(auth.auth_type, "Basic");
    }
}

//! Person records produced by the generator.

use serde::Serialize;

/// Build the DN for a person entry: `uid=<uid>,<suffix_dn>`.
pub fn build_dn(uid: &str, suffix_dn: &str) -> String {
    format!("uid={uid},{suffix_dn}")
}

/// A single generated person.
///
/// The DN is always derived from the uid and the run's suffix, so there is no
/// way to construct a record whose DN disagrees with its uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRecord {
    dn: String,
    uid: String,
    cn: String,
    sn: String,
    mail: String,
}

impl PersonRecord {
    /// Create a record under `suffix_dn`.
    pub fn new(
        suffix_dn: &str,
        uid: impl Into<String>,
        cn: impl Into<String>,
        sn: impl Into<String>,
        mail: impl Into<String>,
    ) -> Self {
        let uid = uid.into();
        Self {
            dn: build_dn(&uid, suffix_dn),
            uid,
            cn: cn.into(),
            sn: sn.into(),
            mail: mail.into(),
        }
    }

    /// Full distinguished name, e.g. `uid=jdoe,ou=employee,ou=users,o=rtx`.
    pub fn dn(&self) -> &str {
        &self.dn
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Common (display) name.
    pub fn cn(&self) -> &str {
        &self.cn
    }

    /// Surname.
    pub fn sn(&self) -> &str {
        &self.sn
    }

    pub fn mail(&self) -> &str {
        &self.mail
    }

    /// Rebuild a record from parts whose DN is already known.
    ///
    /// Only used when reading entries back; the DN is kept verbatim.
    pub(crate) fn from_parts(dn: String, uid: String, cn: String, sn: String, mail: String) -> Self {
        Self {
            dn,
            uid,
            cn,
            sn,
            mail,
        }
    }
}

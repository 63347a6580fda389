pub mod application;
pub mod association;
pub mod company;
pub mod event;
pub mod person;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A string that is not part of an enum's wire vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Decodes an enum column read back from the store. A null or unknown value
/// means the database no longer matches the code, so it is an internal error.
pub fn decode_stored<T>(column: &str, value: Option<String>) -> Result<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    let raw = value.ok_or_else(|| Error::Internal(format!("stored {} is null", column)))?;
    raw.parse()
        .map_err(|e: UnknownVariant| Error::Internal(format!("stored {}: {}", column, e)))
}

/// Declares a closed enum with a fixed wire vocabulary. Serde, `FromStr`,
/// `Display` and `as_str` all read from the same variant/string table.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::models::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use wire_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::CompanyType;

    #[test]
    fn decode_stored_rejects_null_and_unknown_as_internal() {
        assert_eq!(
            decode_stored::<CompanyType>("company_type", Some("recruiter".into())).unwrap(),
            CompanyType::Recruiter
        );
        assert!(matches!(
            decode_stored::<CompanyType>("company_type", None),
            Err(Error::Internal(_))
        ));
        assert!(matches!(
            decode_stored::<CompanyType>("company_type", Some("agency".into())),
            Err(Error::Internal(_))
        ));
    }
}

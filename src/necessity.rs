use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::error::DecodeError;

/// Whether a property must carry a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Necessity {
    Required,
    Optional,
}

impl Necessity {
    /// Always derived from the type; there is no other source of truth.
    pub fn of<T: TypeDescriptor>(ty: &T) -> Self {
        if ty.is_optional() {
            Self::Optional
        } else {
            Self::Required
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }

    pub fn is_optional(self) -> bool {
        matches!(self, Self::Optional)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for Necessity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Necessity {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            other => Err(DecodeError::MalformedNecessity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_info::{PrimitiveType, TypeInformation};

    #[test]
    fn derived_from_optionality() {
        let samples = [
            TypeInformation::scalar(PrimitiveType::Int),
            TypeInformation::optional(TypeInformation::scalar(PrimitiveType::String)),
            TypeInformation::repeated(TypeInformation::optional(TypeInformation::scalar(PrimitiveType::Bool))),
            TypeInformation::optional(TypeInformation::repeated(TypeInformation::scalar(PrimitiveType::Bool))),
            TypeInformation::reference("User"),
        ];
        for ty in &samples {
            let expected = if ty.is_optional() { Necessity::Optional } else { Necessity::Required };
            assert_eq!(Necessity::of(ty), expected, "{ty:?}");
        }
        assert!(Necessity::of(&samples[0]).is_required());
        assert!(Necessity::of(&samples[1]).is_optional());
        assert!(Necessity::of(&samples[2]).is_required());
    }

    #[test]
    fn wire_tokens_are_lowercase() {
        assert_eq!(serde_json::to_string(&Necessity::Required).unwrap(), r#""required""#);
        assert_eq!(serde_json::to_string(&Necessity::Optional).unwrap(), r#""optional""#);
        let n: Necessity = serde_json::from_str(r#""optional""#).unwrap();
        assert_eq!(n, Necessity::Optional);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(serde_json::from_str::<Necessity>(r#""Required""#).is_err());
        assert!(serde_json::from_str::<Necessity>(r#""maybe""#).is_err());

        let err = "maybe".parse::<Necessity>().unwrap_err();
        assert!(matches!(err, DecodeError::MalformedNecessity(ref t) if t == "maybe"));
        assert_eq!("required".parse::<Necessity>().unwrap(), Necessity::Required);
        assert_eq!(Necessity::Optional.to_string(), "optional");
    }
}

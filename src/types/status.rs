use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

const RELEASED_FLAG: &str = "TRUE";
const ACTIVE_FLAG: &str = "FALSE";

/// Lifecycle state of a loan, decided once when a row leaves the ledger.
///
/// The ledger stores this as a free-text `released` column. Only the exact,
/// case-sensitive literal `TRUE` means released; every other value, including
/// an absent or empty column, is an active loan.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum LoanStatus {
    #[default]
    Active,
    Released
}

impl LoanStatus {
    /// Maps the raw `released` column onto a status.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(RELEASED_FLAG) => LoanStatus::Released,
            None | Some("") | Some(ACTIVE_FLAG) => LoanStatus::Active,
            Some(other) => {
                warn!("Unrecognised released flag '{other}', treating loan as active");
                LoanStatus::Active
            }
        }
    }

    /// The literal written back to the `released` column.
    pub fn as_flag(&self) -> &'static str {
        match self {
            LoanStatus::Active => ACTIVE_FLAG,
            LoanStatus::Released => RELEASED_FLAG
        }
    }

    pub fn is_active(&self) -> bool {
        *self == LoanStatus::Active
    }

    pub fn is_released(&self) -> bool {
        *self == LoanStatus::Released
    }
}

impl Serialize for LoanStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_flag())
    }
}

impl<'de> Deserialize<'de> for LoanStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let flag = Option::<String>::deserialize(deserializer)?;
        Ok(LoanStatus::from_flag(flag.as_deref()))
    }
}

use splitta_domain::Money;

/// How amounts are shown to users. Amounts are always rendered with two decimals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
        }
    }

    pub fn format(&self, amount: Money) -> String {
        format!("{} {amount}", self.symbol)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("INR", "₹")
    }
}

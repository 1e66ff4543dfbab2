/// The service a prospect asked about on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceInterest {
    MobileFinancialServices,
    DigitalFinancialServices,
    Ekyc,
    Booking,
    Sms,
    Custom,
}

impl ServiceInterest {
    pub const ALL: [ServiceInterest; 6] = [
        Self::MobileFinancialServices,
        Self::DigitalFinancialServices,
        Self::Ekyc,
        Self::Booking,
        Self::Sms,
        Self::Custom,
    ];

    pub fn parse(code: &str) -> Result<Self, ServiceInterestParseError> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|interest| interest.code() == code)
            .ok_or(ServiceInterestParseError)
    }

    /// Wire value sent by the contact form.
    pub fn code(self) -> &'static str {
        match self {
            Self::MobileFinancialServices => "mfs",
            Self::DigitalFinancialServices => "dfs",
            Self::Ekyc => "ekyc",
            Self::Booking => "booking",
            Self::Sms => "sms",
            Self::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MobileFinancialServices => "Mobile Services",
            Self::DigitalFinancialServices => "Digital Platforms",
            Self::Ekyc => "Identity Verification",
            Self::Booking => "Session Booking",
            Self::Sms => "Messaging Integration",
            Self::Custom => "Custom Solution",
        }
    }
}

impl std::fmt::Display for ServiceInterest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Service interest must be one of: mfs, dfs, ekyc, booking, sms, custom")]
pub struct ServiceInterestParseError;

use core::fmt;

/// Mesh peering reason codes carried by Close elements.
///
/// Values outside the known set survive decode/encode as `Unrecognized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    PeeringCancelled,
    MaxPeers,
    ConfigurationPolicyViolation,
    CloseReceived,
    MaxRetries,
    ConfirmTimeout,
    InvalidGtk,
    InconsistentParameters,
    InvalidSecurityCapability,
    #[default]
    Reserved,
    Unrecognized(u16),
}

impl ReasonCode {
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::PeeringCancelled => 52,
            Self::MaxPeers => 53,
            Self::ConfigurationPolicyViolation => 54,
            Self::CloseReceived => 55,
            Self::MaxRetries => 56,
            Self::ConfirmTimeout => 57,
            Self::InvalidGtk => 58,
            Self::InconsistentParameters => 59,
            Self::InvalidSecurityCapability => 60,
            Self::Reserved => 67,
            Self::Unrecognized(value) => value,
        }
    }

    /// Maps a wire value to its variant. Known values never come back as
    /// `Unrecognized`.
    pub const fn from_u16(value: u16) -> Self {
        match value {
            52 => Self::PeeringCancelled,
            53 => Self::MaxPeers,
            54 => Self::ConfigurationPolicyViolation,
            55 => Self::CloseReceived,
            56 => Self::MaxRetries,
            57 => Self::ConfirmTimeout,
            58 => Self::InvalidGtk,
            59 => Self::InconsistentParameters,
            60 => Self::InvalidSecurityCapability,
            67 => Self::Reserved,
            other => Self::Unrecognized(other),
        }
    }

    /// `Unrecognized` values that name a known code become that code.
    pub const fn canonical(self) -> Self {
        Self::from_u16(self.as_u16())
    }

    fn name(self) -> &'static str {
        match self {
            Self::PeeringCancelled => "peering-cancelled",
            Self::MaxPeers => "max-peers",
            Self::ConfigurationPolicyViolation => "configuration-policy-violation",
            Self::CloseReceived => "close-received",
            Self::MaxRetries => "max-retries",
            Self::ConfirmTimeout => "confirm-timeout",
            Self::InvalidGtk => "invalid-gtk",
            Self::InconsistentParameters => "inconsistent-parameters",
            Self::InvalidSecurityCapability => "invalid-security-capability",
            Self::Reserved => "reserved",
            Self::Unrecognized(_) => "unrecognized",
        }
    }
}

impl From<u16> for ReasonCode {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl From<ReasonCode> for u16 {
    fn from(value: ReasonCode) -> Self {
        value.as_u16()
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u16())
    }
}

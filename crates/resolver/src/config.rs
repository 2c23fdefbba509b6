use crate::error::ResolverError;

/// Selectable bandwidth tiers in kbit/s, ascending.
pub const BANDWIDTH_TIERS: [u32; 6] = [300, 500, 900, 1600, 2500, 5000];

/// Returns the upper bracket boundary for a configured tier.
///
/// `Ok(None)` means the tier is the highest one and the bracket is open at
/// the top. A value that is not a tier member is rejected.
pub fn next_tier(low: u32) -> Result<Option<u32>, ResolverError> {
    let index = BANDWIDTH_TIERS
        .iter()
        .position(|&tier| tier == low)
        .ok_or(ResolverError::UnknownBandwidthTier(low))?;
    Ok(BANDWIDTH_TIERS.get(index + 1).copied())
}

/// Resolution settings, mapped from the host's string-typed settings store
/// at the boundary. Resolution logic never reads ambient settings.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    bandwidth_select: bool,
    bandwidth: Option<u32>,
}

impl ResolverConfig {
    /// Validates the combination: a configured bandwidth must be a tier
    /// member, and enabling selection requires one.
    pub fn new(bandwidth_select: bool, bandwidth: Option<u32>) -> Result<Self, ResolverError> {
        if let Some(low) = bandwidth {
            next_tier(low)?;
        }
        if bandwidth_select && bandwidth.is_none() {
            return Err(ResolverError::MissingSetting("bandwidth"));
        }
        Ok(Self {
            bandwidth_select,
            bandwidth,
        })
    }

    /// Builds a config from the raw settings-store values.
    ///
    /// `bwselect` is true only for the literal string `"true"`. `bandwidth`
    /// is stored as a numeric string and may carry a fractional part, which
    /// is truncated.
    pub fn from_settings(
        bandwidth: Option<&str>,
        bwselect: Option<&str>,
    ) -> Result<Self, ResolverError> {
        let bandwidth_select = bwselect == Some("true");
        let bandwidth = match bandwidth {
            Some(raw) if !raw.is_empty() => {
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| ResolverError::InvalidSetting {
                        name: "bandwidth",
                        value: raw.to_string(),
                    })?;
                Some(value as u32)
            }
            _ => None,
        };
        Self::new(bandwidth_select, bandwidth)
    }

    /// Whether HLS playback is restricted to a variant inside the
    /// configured bracket.
    pub fn bandwidth_select(&self) -> bool {
        self.bandwidth_select
    }

    /// Lower bracket boundary in kbit/s, a member of [`BANDWIDTH_TIERS`].
    pub fn bandwidth(&self) -> Option<u32> {
        self.bandwidth
    }
}

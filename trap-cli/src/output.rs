use {
    basefee_trap::{Decision, Payload, Sample},
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Display,
    Json,
    JsonCompact,
}

impl OutputFormat {
    pub fn from_matches(value: Option<&str>) -> Self {
        match value {
            Some("json") => OutputFormat::Json,
            Some("json-compact") => OutputFormat::JsonCompact,
            _ => OutputFormat::Display,
        }
    }

    pub fn formatted_string<T: Serialize + fmt::Display>(
        &self,
        item: &T,
    ) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Display => Ok(format!("{item}")),
            OutputFormat::Json => serde_json::to_string_pretty(item),
            OutputFormat::JsonCompact => serde_json::to_string(item),
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ── collect ─────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CliSample {
    pub base_fee: u64,
    pub threshold: Option<u64>,
    pub layout: String,
    pub encoded: String,
}

impl CliSample {
    pub fn new(sample: &Sample) -> Self {
        Self {
            base_fee: sample.value,
            threshold: sample.threshold,
            layout: sample.layout().to_string(),
            encoded: to_hex(&sample.encode()),
        }
    }
}

impl fmt::Display for CliSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base Fee:   {} wei", self.base_fee)?;
        if let Some(threshold) = self.threshold {
            writeln!(f, "Threshold:  {threshold}%")?;
        }
        writeln!(f, "Layout:     {}", self.layout)?;
        write!(f, "Encoded:    {}", self.encoded)
    }
}

// ── should-respond ──────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CliDecision {
    pub triggered: bool,
    pub payload: String,
    pub payload_hex: String,
}

impl CliDecision {
    pub fn new(decision: &Decision) -> Self {
        Self {
            triggered: decision.triggered,
            payload: decision.payload.to_string(),
            payload_hex: to_hex(&decision.payload.to_bytes()),
        }
    }
}

impl fmt::Display for CliDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Triggered:  {}", self.triggered)?;
        writeln!(f, "Payload:    {}", self.payload)?;
        write!(f, "Bytes:      {}", self.payload_hex)
    }
}

// ── replay ──────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliSpike {
    /// Zero-based index of the sample that completed the spike.
    pub index: usize,
    pub previous: u64,
    pub current: u64,
    pub percent_change: u128,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliReplaySummary {
    pub samples: usize,
    pub threshold_pct: u64,
    pub not_enough_data: usize,
    pub zero_baseline: usize,
    pub stable: usize,
    pub emitted: usize,
    pub spikes: Vec<CliSpike>,
}

impl CliReplaySummary {
    pub fn record(&mut self, index: usize, payload: &Payload) {
        match payload {
            Payload::NotEnoughData => self.not_enough_data = self.not_enough_data.saturating_add(1),
            Payload::ZeroBaseline => self.zero_baseline = self.zero_baseline.saturating_add(1),
            Payload::Stable => self.stable = self.stable.saturating_add(1),
            Payload::Spike(spike) => self.spikes.push(CliSpike {
                index,
                previous: spike.previous,
                current: spike.current,
                percent_change: spike.percent_change,
            }),
        }
    }
}

impl fmt::Display for CliReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Replay Summary (threshold {}%)", self.threshold_pct)?;
        writeln!(f, "  Samples:          {}", self.samples)?;
        writeln!(f, "  Not Enough Data:  {}", self.not_enough_data)?;
        writeln!(f, "  Zero Baseline:    {}", self.zero_baseline)?;
        writeln!(f, "  Stable:           {}", self.stable)?;
        write!(f, "  Spikes:           {}", self.spikes.len())?;
        if !self.spikes.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            writeln!(f, "  {:<8} {:>22} {:>22} {:>10}", "Index", "Previous", "Current", "Change")?;
            write!(f, "  {}", "-".repeat(65))?;
            for spike in &self.spikes {
                writeln!(f)?;
                write!(
                    f,
                    "  {:<8} {:>22} {:>22} {:>9}%",
                    spike.index, spike.previous, spike.current, spike.percent_change
                )?;
            }
        }
        Ok(())
    }
}

// ── emit ────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug)]
pub struct CliEmitted {
    pub event: String,
    pub data: String,
}

impl fmt::Display for CliEmitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Emitted {} ({})", self.event, self.data)
    }
}

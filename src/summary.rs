//! Simulated summary generation: a progress ticker, then a fixed summary.

use std::time::Duration;
use tokio::sync::mpsc;

pub const DEFAULT_TICK: Duration = Duration::from_millis(200);
pub const PROGRESS_STEP: u8 = 10;

pub const SAMPLE_TEXT: &str = "Photosynthesis is the process by which green plants and some other organisms use sunlight to synthesize foods with the help of chlorophyll pigments. During photosynthesis, plants convert carbon dioxide and water into glucose and oxygen using energy from sunlight. This process occurs in two main stages: the light-dependent reactions (in the thylakoids) and the light-independent reactions or Calvin cycle (in the stroma). The overall equation for photosynthesis is: 6CO2 + 6H2O + light energy → C6H12O6 + 6O2. Photosynthesis is crucial for life on Earth as it produces oxygen and forms the base of most food chains.";

pub const SAMPLE_SUMMARY: &str = "**Main Process**: Photosynthesis converts sunlight, carbon dioxide, and water into glucose and oxygen using chlorophyll in plants.

**Two Key Stages**:
• Light-dependent reactions (thylakoids) - capture and convert light energy
• Calvin cycle (stroma) - use energy to create glucose from CO2

**Chemical Equation**: 6CO2 + 6H2O + light → C6H12O6 + 6O2

**Importance**: Essential for life on Earth - produces oxygen and forms the foundation of food chains.

**Key Components**: Chlorophyll pigments, sunlight, carbon dioxide, water";

/// What a background summary job reports, in order: ten `Progress` steps
/// and then `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEvent {
    Progress(u8),
    Ready(String),
}

#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    tick: Duration,
}

impl SummaryGenerator {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    /// Reports 10, 20, ... 100 on successive ticks, then yields the summary.
    /// Blank input returns `None` straight away without ticking.
    pub async fn generate<F>(&self, input: &str, mut on_progress: F) -> Option<String>
    where
        F: FnMut(u8),
    {
        if input.trim().is_empty() {
            return None;
        }

        let mut progress = 0u8;
        let mut interval = tokio::time::interval(self.tick);
        // first tick of a tokio interval fires immediately
        interval.tick().await;
        while progress < 100 {
            interval.tick().await;
            progress += PROGRESS_STEP;
            on_progress(progress);
        }

        tracing::debug!("summary ready for {} chars of input", input.len());
        Some(SAMPLE_SUMMARY.to_string())
    }

    /// Runs [`generate`](Self::generate) on its own task and returns the
    /// event stream straight away. Blank input starts nothing. The job runs
    /// to completion even if the receiver is dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, input: &str) -> Option<mpsc::UnboundedReceiver<SummaryEvent>> {
        if input.trim().is_empty() {
            return None;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let generator = self.clone();
        let input = input.to_string();
        tokio::spawn(async move {
            let progress = tx.clone();
            let summary = generator
                .generate(&input, |p| {
                    // a closed receiver only means nobody is watching
                    let _ = progress.send(SummaryEvent::Progress(p));
                })
                .await;
            if let Some(text) = summary {
                let _ = tx.send(SummaryEvent::Ready(text));
            }
        });
        Some(rx)
    }
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

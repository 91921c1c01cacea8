//! Display mapping for transfer state.
//!
//! Pure lookups from the server's status enums to label, emoji and tone, plus
//! the percentage clamp every progress bar is drawn from.

use super::model::{SongTransferStatus, TransferStatus};

/// Colour family of a status; the TUI turns it into a concrete colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Waiting,
    Active,
    Success,
    Danger,
    Caution,
    Muted,
}

impl TransferStatus {
    pub const KNOWN: [TransferStatus; 5] = [
        TransferStatus::Pending,
        TransferStatus::Processing,
        TransferStatus::Completed,
        TransferStatus::Failed,
        TransferStatus::Partial,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            TransferStatus::Pending => "⏳",
            TransferStatus::Processing => "🔄",
            TransferStatus::Completed => "✅",
            TransferStatus::Failed => "❌",
            TransferStatus::Partial => "⚠️",
            TransferStatus::Unknown => "❔",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransferStatus::Pending => "Pending",
            TransferStatus::Processing => "Processing",
            TransferStatus::Completed => "Completed",
            TransferStatus::Failed => "Failed",
            TransferStatus::Partial => "Partial",
            TransferStatus::Unknown => "Unknown",
        }
    }

    pub fn tone(self) -> StatusTone {
        match self {
            TransferStatus::Pending => StatusTone::Waiting,
            TransferStatus::Processing => StatusTone::Active,
            TransferStatus::Completed => StatusTone::Success,
            TransferStatus::Failed => StatusTone::Danger,
            TransferStatus::Partial => StatusTone::Caution,
            TransferStatus::Unknown => StatusTone::Muted,
        }
    }

    /// `"✅ Completed"`
    pub fn badge(self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }

    pub fn is_active(self) -> bool {
        matches!(self, TransferStatus::Pending | TransferStatus::Processing)
    }

    /// Mirrors the backend: finished or failed jobs reject cancellation.
    pub fn can_cancel(self) -> bool {
        !matches!(self, TransferStatus::Completed | TransferStatus::Failed)
    }
}

impl SongTransferStatus {
    pub fn emoji(self) -> &'static str {
        match self {
            SongTransferStatus::Success => "✅",
            SongTransferStatus::Failed => "❌",
            SongTransferStatus::NotFound => "🔍",
            SongTransferStatus::Duplicate => "♻️",
            SongTransferStatus::Unknown => "❔",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SongTransferStatus::Success => "Transferred",
            SongTransferStatus::Failed => "Failed",
            SongTransferStatus::NotFound => "Not found",
            SongTransferStatus::Duplicate => "Duplicate",
            SongTransferStatus::Unknown => "Unknown",
        }
    }

    pub fn tone(self) -> StatusTone {
        match self {
            SongTransferStatus::Success => StatusTone::Success,
            SongTransferStatus::Failed => StatusTone::Danger,
            SongTransferStatus::NotFound => StatusTone::Caution,
            SongTransferStatus::Duplicate => StatusTone::Muted,
            SongTransferStatus::Unknown => StatusTone::Muted,
        }
    }
}

pub fn clamp_percentage(percentage: i64) -> u16 {
    percentage.clamp(0, 100) as u16
}

/// Filled cells of a `width`-cell bar for a reported percentage.
pub fn bar_width(percentage: i64, width: u16) -> u16 {
    let p = u32::from(clamp_percentage(percentage));
    let filled = (p * u32::from(width) + 50) / 100;
    filled.min(u32::from(width)) as u16
}

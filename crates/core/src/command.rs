// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use breakshot_domain::{Giveaway, TemplateStatus, Tournament, TournamentStatus};

/// A tournament command represents user or system intent as data only.
///
/// Commands are the only way to request tournament state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentCommand {
    /// Submit a new tournament for review. It always lands in `pending`.
    Submit {
        /// The tournament as submitted.
        tournament: Box<Tournament>,
    },
    /// Approve a pending tournament.
    Approve,
    /// Deny a pending tournament.
    Deny {
        /// Why it was denied.
        reason: String,
    },
    /// Delete a tournament, moving it to history.
    Delete {
        /// Why it was deleted.
        reason: String,
    },
    /// Bring a deleted tournament back to the live table.
    Restore {
        /// `pending` or `approved`.
        target: TournamentStatus,
    },
    /// Mark an approved tournament as running.
    Activate,
    /// Archive a past tournament by hand.
    Archive,
    /// Pause, resume or end a recurring master's template.
    SetTemplateStatus {
        /// The new template status.
        status: TemplateStatus,
    },
}

impl TournamentCommand {
    /// Returns the audit action name for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "SubmitTournament",
            Self::Approve => "ApproveTournament",
            Self::Deny { .. } => "DenyTournament",
            Self::Delete { .. } => "DeleteTournament",
            Self::Restore { .. } => "RestoreTournament",
            Self::Activate => "ActivateTournament",
            Self::Archive => "ArchiveTournament",
            Self::SetTemplateStatus { .. } => "SetTemplateStatus",
        }
    }
}

/// A giveaway command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiveawayCommand {
    /// Create a new giveaway. It always starts `active`.
    Create {
        /// The giveaway as submitted.
        giveaway: Box<Giveaway>,
    },
    /// Close a giveaway before or at its end time.
    End,
}

impl GiveawayCommand {
    /// Returns the audit action name for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "CreateGiveaway",
            Self::End => "EndGiveaway",
        }
    }
}

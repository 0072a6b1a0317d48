//! Per-request squad context builder.
//!
//! Runs the sequential catalog -> entry -> picks fetch chain and renders
//! the manager's squad into the textual context blob embedded in the
//! language-model prompt. A failed catalog fetch is fatal; any later
//! failure degrades to a [`ContextOutcome::Degraded`] value whose rendered
//! form carries the [`DEGRADED_PREFIX`] sentinel, so callers can branch on
//! structure while clients still see the historical sentinel text.

use crate::catalog::{PlayerCatalog, PlayerInfo};
use crate::client::{FplClient, FplError};
use crate::types::Pick;

/// Prefix on every rendered degraded context. Part of the HTTP contract:
/// the projection endpoint returns this text verbatim in its error body.
pub const DEGRADED_PREFIX: &str = "FPL Team Context:";

/// Which feature the context is being built for.
///
/// The two variants share one formatter; they differ only in the per-player
/// detail column (form vs. cost) and in how much surrounding detail the
/// rendered block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextVariant {
    /// Transfer-advice chat: compact, form-based lines.
    Chat,
    /// Projected-points estimate: full block with prices and financials.
    Projection,
}

impl ContextVariant {
    fn gameweek_unknown_reason(self) -> &'static str {
        match self {
            ContextVariant::Chat => "current gameweek unknown.",
            ContextVariant::Projection => {
                "Manager ID found, but current gameweek could not be determined. \
                 Point projection cannot be performed."
            }
        }
    }

    fn fetch_failure_reason(self) -> &'static str {
        match self {
            ContextVariant::Chat => "could not fetch squad.",
            ContextVariant::Projection => {
                "Could not fetch and fully map your current team data from the FPL API."
            }
        }
    }
}

/// A fully-assembled squad context for one manager and gameweek.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadContext {
    pub variant: ContextVariant,
    pub current_gameweek: i32,
    pub team_name: String,
    pub manager_name: String,
    /// Formatted player lines, at most 11.
    pub starting_eleven: Vec<String>,
    /// Formatted player lines tagged with bench slot, ascending.
    pub bench: Vec<String>,
    /// `"£1.5m"`-style bank balance, `"N/A"` when the picks response
    /// carried no financials.
    pub money_in_bank: String,
    pub free_transfers: String,
}

impl SquadContext {
    /// Render the context into the textual form embedded in the prompt.
    pub fn render(&self) -> String {
        match self.variant {
            ContextVariant::Chat => format!(
                "CURRENT GW{} | STARTING XI: {}\nBENCH: {}",
                self.current_gameweek,
                self.starting_eleven.join("; "),
                self.bench.join("; "),
            ),
            ContextVariant::Projection => format!(
                "CURRENT FPL SQUAD CONTEXT FOR GAMEWEEK {}:\n\
                 Team Name: {}\n\
                 Manager: {}\n\
                 Money in the Bank: {}\n\
                 Free Transfers Left: {}\n\
                 \n\
                 Starting XI (Name | Position | Club | Cost | Status):\n{}\n\
                 \n\
                 Bench (Name | Position | Club | Cost | Slot):\n{}\n\
                 \n\
                 INSTRUCTIONS: The squad above is the one to project points for. \
                 Use the player names and clubs in the starting XI to analyze form, \
                 fixtures, and news. Base your point projection ONLY on this squad.",
                self.current_gameweek,
                self.team_name,
                self.manager_name,
                self.money_in_bank,
                self.free_transfers,
                self.starting_eleven.join("\n"),
                self.bench.join("\n"),
            ),
        }
    }
}

/// Outcome of a context build: either a usable squad context, or a
/// soft-failure reason.
///
/// Degradation is not an error at this boundary -- the chat feature still
/// answers against a degraded context, and the projection handler decides
/// whether to reject it.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextOutcome {
    Ready(SquadContext),
    Degraded { reason: String },
}

impl ContextOutcome {
    /// Render the outcome into prompt text. Degraded outcomes render as
    /// the sentinel-prefixed reason.
    pub fn render(&self) -> String {
        match self {
            ContextOutcome::Ready(ctx) => ctx.render(),
            ContextOutcome::Degraded { reason } => format!("{DEGRADED_PREFIX} {reason}"),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ContextOutcome::Degraded { .. })
    }

    /// Gameweek to quote in the prompt. Falls back to 1 when the real
    /// gameweek could not be determined.
    pub fn current_gameweek(&self) -> i32 {
        match self {
            ContextOutcome::Ready(ctx) => ctx.current_gameweek,
            ContextOutcome::Degraded { .. } => 1,
        }
    }
}

/// Builds squad contexts against an [`FplClient`].
pub struct ContextBuilder<'a> {
    client: &'a FplClient,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(client: &'a FplClient) -> Self {
        Self { client }
    }

    /// Build the squad context for one manager.
    ///
    /// A failed catalog fetch is fatal and returns `Err`. Any failure after
    /// the catalog resolved (entry, picks, unknown gameweek) degrades to
    /// [`ContextOutcome::Degraded`] instead of propagating.
    pub async fn build(
        &self,
        manager_id: &str,
        variant: ContextVariant,
    ) -> Result<ContextOutcome, FplError> {
        let bootstrap = self.client.bootstrap_static().await?;
        let catalog = PlayerCatalog::from_bootstrap(&bootstrap);

        match self.assemble(&catalog, manager_id, variant).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                tracing::warn!(manager_id, error = %err, "squad fetch failed, degrading context");
                Ok(ContextOutcome::Degraded {
                    reason: variant.fetch_failure_reason().to_string(),
                })
            }
        }
    }

    async fn assemble(
        &self,
        catalog: &PlayerCatalog,
        manager_id: &str,
        variant: ContextVariant,
    ) -> Result<ContextOutcome, FplError> {
        let entry = self.client.entry(manager_id).await?;

        let Some(gameweek) = entry.current_event else {
            return Ok(ContextOutcome::Degraded {
                reason: variant.gameweek_unknown_reason().to_string(),
            });
        };

        let picks = self.client.picks(manager_id, gameweek).await?;
        let (starting_eleven, bench) = build_squad_lines(catalog, &picks.picks, variant);

        let money_in_bank = picks
            .entry_history
            .as_ref()
            .map_or("N/A".to_string(), |h| {
                format!("£{:.1}m", h.bank as f64 / 10.0)
            });
        let free_transfers = entry
            .event_transfers_left
            .map_or("N/A".to_string(), |n| n.to_string());

        Ok(ContextOutcome::Ready(SquadContext {
            variant,
            current_gameweek: gameweek,
            team_name: entry.name,
            manager_name: format!("{} {}", entry.player_first_name, entry.player_last_name),
            starting_eleven,
            bench,
            money_in_bank,
            free_transfers,
        }))
    }
}

/// Partition picks into starting eleven and bench and format each line.
///
/// Starting slots are squad positions 1..=11 in upstream order; bench slots
/// are positions >11, sorted ascending so slot numbering is stable.
fn build_squad_lines(
    catalog: &PlayerCatalog,
    picks: &[Pick],
    variant: ContextVariant,
) -> (Vec<String>, Vec<String>) {
    let starting: Vec<String> = picks
        .iter()
        .filter(|p| p.position <= 11)
        .map(|p| format_pick(catalog.resolve(p.element), p, true, variant))
        .collect();

    let mut bench_picks: Vec<&Pick> = picks.iter().filter(|p| p.position > 11).collect();
    bench_picks.sort_by_key(|p| p.position);

    let bench = bench_picks
        .into_iter()
        .map(|p| format_pick(catalog.resolve(p.element), p, false, variant))
        .collect();

    (starting, bench)
}

/// Format one pick as `Name (Position, Team, <detail>)` with captaincy or
/// bench-slot annotations.
fn format_pick(info: PlayerInfo, pick: &Pick, starting: bool, variant: ContextVariant) -> String {
    let detail = match variant {
        ContextVariant::Chat => format!("form:{}", info.form),
        ContextVariant::Projection => info.cost,
    };

    let mut line = format!("{} ({}, {}, {})", info.name, info.position, info.team, detail);

    if starting {
        if pick.is_captain {
            line.push_str(" [C]");
        } else if pick.is_vice_captain {
            line.push_str(" [VC]");
        }
    } else {
        line.push_str(&format!(" (B{})", pick.position - 11));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BootstrapStatic, Element, ElementType, Team};

    fn catalog() -> PlayerCatalog {
        let bootstrap = BootstrapStatic {
            elements: (1..=15)
                .map(|id| Element {
                    id,
                    first_name: "Player".into(),
                    second_name: format!("{id}"),
                    team: 1,
                    element_type: 3,
                    form: "4.0".into(),
                    now_cost: 55,
                })
                .collect(),
            teams: vec![Team {
                id: 1,
                name: "Arsenal".into(),
            }],
            element_types: vec![ElementType {
                id: 3,
                singular_name_short: "MID".into(),
            }],
        };
        PlayerCatalog::from_bootstrap(&bootstrap)
    }

    fn pick(element: i64, position: i32) -> Pick {
        Pick {
            element,
            position,
            is_captain: false,
            is_vice_captain: false,
        }
    }

    #[test]
    fn partitions_starting_and_bench() {
        let picks: Vec<Pick> = (1..=15).map(|n| pick(n as i64, n)).collect();
        let (starting, bench) = build_squad_lines(&catalog(), &picks, ContextVariant::Chat);

        assert_eq!(starting.len(), 11);
        assert_eq!(bench.len(), picks.len() - starting.len());
    }

    #[test]
    fn bench_sorted_ascending_by_slot() {
        // Bench picks arrive out of order; slot numbering must still ascend.
        let picks = vec![pick(1, 1), pick(15, 15), pick(12, 12), pick(14, 14), pick(13, 13)];
        let (_, bench) = build_squad_lines(&catalog(), &picks, ContextVariant::Chat);

        assert_eq!(bench.len(), 4);
        for (i, line) in bench.iter().enumerate() {
            assert!(
                line.ends_with(&format!("(B{})", i + 1)),
                "bench line {i} should carry slot B{}: {line}",
                i + 1
            );
        }
    }

    #[test]
    fn captain_and_vice_annotations() {
        let mut captain = pick(1, 1);
        captain.is_captain = true;
        let mut vice = pick(2, 2);
        vice.is_vice_captain = true;

        let (starting, _) =
            build_squad_lines(&catalog(), &[captain, vice, pick(3, 3)], ContextVariant::Chat);

        assert!(starting[0].ends_with(" [C]"));
        assert!(starting[1].ends_with(" [VC]"));
        assert!(!starting[2].ends_with("]"));
    }

    #[test]
    fn unknown_player_id_formats_placeholder_line() {
        let (starting, _) = build_squad_lines(&catalog(), &[pick(9999, 1)], ContextVariant::Chat);
        assert_eq!(starting[0], "ID 9999 (UNK, UNK, form:N/A)");
    }

    #[test]
    fn chat_lines_use_form_and_projection_lines_use_cost() {
        let picks = [pick(1, 1)];
        let (chat, _) = build_squad_lines(&catalog(), &picks, ContextVariant::Chat);
        let (projection, _) = build_squad_lines(&catalog(), &picks, ContextVariant::Projection);

        assert_eq!(chat[0], "Player 1 (MID, Arsenal, form:4.0)");
        assert_eq!(projection[0], "Player 1 (MID, Arsenal, £5.5m)");
    }

    #[test]
    fn chat_render_shape() {
        let ctx = SquadContext {
            variant: ContextVariant::Chat,
            current_gameweek: 7,
            team_name: "Test FC".into(),
            manager_name: "Ada Lovelace".into(),
            starting_eleven: vec!["A (MID, Arsenal, form:4.0) [C]".into()],
            bench: vec!["B (MID, Arsenal, form:4.0) (B1)".into()],
            money_in_bank: "N/A".into(),
            free_transfers: "N/A".into(),
        };

        let rendered = ctx.render();
        assert_eq!(
            rendered,
            "CURRENT GW7 | STARTING XI: A (MID, Arsenal, form:4.0) [C]\n\
             BENCH: B (MID, Arsenal, form:4.0) (B1)"
        );
    }

    #[test]
    fn projection_render_includes_financials() {
        let ctx = SquadContext {
            variant: ContextVariant::Projection,
            current_gameweek: 7,
            team_name: "Test FC".into(),
            manager_name: "Ada Lovelace".into(),
            starting_eleven: vec!["A (MID, Arsenal, £5.5m)".into()],
            bench: vec!["B (MID, Arsenal, £5.5m) (B1)".into()],
            money_in_bank: "£1.5m".into(),
            free_transfers: "2".into(),
        };

        let rendered = ctx.render();
        assert!(rendered.starts_with("CURRENT FPL SQUAD CONTEXT FOR GAMEWEEK 7:"));
        assert!(rendered.contains("Team Name: Test FC"));
        assert!(rendered.contains("Money in the Bank: £1.5m"));
        assert!(rendered.contains("Free Transfers Left: 2"));
        assert!(rendered.contains("Starting XI"));
    }

    #[test]
    fn degraded_outcome_renders_sentinel() {
        let outcome = ContextOutcome::Degraded {
            reason: "current gameweek unknown.".into(),
        };
        assert_eq!(
            outcome.render(),
            "FPL Team Context: current gameweek unknown."
        );
        assert!(outcome.is_degraded());
        assert_eq!(outcome.current_gameweek(), 1);
    }
}

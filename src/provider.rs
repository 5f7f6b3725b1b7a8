use tracing::warn;

use crate::state::{Delta, ProviderCommand};
use crate::statsbomb::EventSource;

/// Runs a command against the source, blocking until it finishes.
///
/// Failures come back as a `[WARN]` log delta; the caller's state is left as it was.
pub fn run_command(source: &dyn EventSource, cmd: ProviderCommand) -> Vec<Delta> {
    match cmd {
        ProviderCommand::FetchMatches {
            competition_id,
            season_id,
        } => match source.fetch_matches(competition_id, season_id) {
            Ok(matches) => vec![Delta::SetMatches(matches)],
            Err(err) => {
                warn!(
                    competition_id,
                    season_id,
                    error = %format!("{err:#}"),
                    "matches fetch failed"
                );
                vec![Delta::Log(format!("[WARN] Matches fetch error: {err:#}"))]
            }
        },
        ProviderCommand::FetchEvents { info } => match source.fetch_events(info.match_id) {
            Ok(events) => vec![Delta::SetEvents { info, events }],
            Err(err) => {
                warn!(match_id = info.match_id, error = %format!("{err:#}"), "events fetch failed");
                vec![Delta::Log(format!(
                    "[WARN] Events fetch error ({}): {err:#}",
                    info.label()
                ))]
            }
        },
    }
}

//! End-to-end analysis of one server log.

use serde::Serialize;

use crate::clock::reconstruct_frags;
use crate::document::LogDocument;
use crate::error::LogError;
use crate::extract::{HeaderInfo, extract_frag_events, parse_header, parse_session_meta};
use crate::frag::ReconstructedFrag;
use crate::session::{EndTimePolicy, SessionMeta, resolve_session_boundaries};
use crate::streak::{StreakTable, calculate_serial_killers, calculate_serial_losers};

/// Everything derived from one log.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub header: HeaderInfo,
    pub session: SessionMeta,
    pub frags: Vec<ReconstructedFrag>,
    pub serial_killers: StreakTable,
    pub serial_losers: StreakTable,
}

/// Runs every stage in order, stopping at the first structural error.
pub fn analyze(doc: &LogDocument, policy: EndTimePolicy) -> Result<MatchReport, LogError> {
    let header = parse_header(doc)?;
    let (mode, map) = parse_session_meta(doc)?;
    let frags = reconstruct_frags(&header, extract_frag_events(doc));
    let (start_time, end_time) = resolve_session_boundaries(doc, &header, &frags, policy)?;
    let serial_killers = calculate_serial_killers(&frags);
    let serial_losers = calculate_serial_losers(&frags);
    tracing::info!(
        %mode,
        %map,
        frags = frags.len(),
        players = serial_killers.len(),
        "analyzed match"
    );
    Ok(MatchReport {
        header,
        session: SessionMeta {
            mode,
            map,
            start_time,
            end_time,
        },
        frags,
        serial_killers,
        serial_losers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
Log Started at Friday, November 09, 2018 12:22:07
<22:07>  Lua cvar: (g_timezone,-5)
<22:10>  Loading level Levels/mp_surf, mission ASSAULT ------
<22:31>  Precaching level ... done
<48:40>  <Lua> papazark killed lamonthe with AG36
<55:02>  <Lua> papazark killed cyap with M4
<03:15>  <Lua> lamonthe killed papazark with Rocket
<04:00>  <Lua> cyap killed itself
<06:30>  == Statistics ==
";

    #[test]
    fn analyzes_a_full_log() {
        let report = analyze(&LogDocument::new(LOG), EndTimePolicy::Strict).unwrap();

        assert_eq!(report.session.mode, "ASSAULT");
        assert_eq!(report.session.map, "mp_surf");
        assert_eq!(report.session.start_time.to_rfc3339(), "2018-11-09T12:22:31-05:00");
        assert_eq!(report.session.end_time.to_rfc3339(), "2018-11-09T13:06:30-05:00");

        let times: Vec<_> = report.frags.iter().map(|f| f.absolute_time.to_rfc3339()).collect();
        assert_eq!(
            times,
            vec![
                "2018-11-09T12:48:40-05:00",
                "2018-11-09T12:55:02-05:00",
                "2018-11-09T13:03:15-05:00",
                "2018-11-09T13:04:00-05:00",
            ]
        );

        assert_eq!(report.serial_killers["papazark"].len(), 2);
        assert_eq!(report.serial_losers["cyap"].len(), 2);
        assert_eq!(
            report.serial_killers.keys().collect::<Vec<_>>(),
            vec!["papazark", "lamonthe", "cyap"]
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let report = analyze(&LogDocument::new(LOG), EndTimePolicy::Strict).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["session"]["map"], "mp_surf");
        assert_eq!(json["header"]["timezone_offset_hours"], -5);
        assert_eq!(json["frags"][3]["type"], "suicide");
    }

    #[test]
    fn structural_errors_abort_the_pipeline() {
        let doc = LogDocument::new(LOG.replace("Loading level", "Unloading"));
        assert_eq!(
            analyze(&doc, EndTimePolicy::Strict).unwrap_err(),
            LogError::MissingSessionInfo
        );
        let doc = LogDocument::new(LOG.replace("(g_timezone,-5)", ""));
        assert_eq!(
            analyze(&doc, EndTimePolicy::Strict).unwrap_err(),
            LogError::MissingTimezoneDirective
        );
    }
}

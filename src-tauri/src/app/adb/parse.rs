use std::sync::OnceLock;

use regex::Regex;

use crate::app::models::PlaybackSnapshot;

pub const UNKNOWN_DESCRIPTION: &str = "Unknown Title/Artist";

static DESCRIPTION_RE: OnceLock<Regex> = OnceLock::new();
static POSITION_RE: OnceLock<Regex> = OnceLock::new();
static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn description_re() -> &'static Regex {
    DESCRIPTION_RE.get_or_init(|| {
        Regex::new(r#"description=([^",\n]+(?:, [^",\n]+)*)"#).expect("valid description regex")
    })
}

fn position_re() -> &'static Regex {
    POSITION_RE.get_or_init(|| {
        Regex::new(r"PlaybackState.*?position=(\d+)").expect("valid position regex")
    })
}

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| Regex::new(r"duration=(\d+)").expect("valid duration regex"))
}

/// Best-effort scrape of `dumpsys media_session`. Each field is matched
/// independently against the whole dump and the first hit wins, so with
/// several sessions present the values may come from different ones.
pub fn parse_media_session(output: &str) -> PlaybackSnapshot {
    let description = description_re()
        .captures(output)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string());

    PlaybackSnapshot {
        description,
        position_ms: first_u64(position_re(), output),
        duration_ms: first_u64(duration_re(), output),
    }
}

fn first_u64(re: &Regex, output: &str) -> u64 {
    re.captures(output)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .unwrap_or(0)
}

/// Only curly apostrophes are normalized; everything else passes through.
pub fn sanitize_text(text: &str) -> String {
    text.replace('\u{2019}', "'")
}

/// `m:ss`, or `h:mm:ss` past an hour.
pub fn format_millis(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

pub fn format_progress(snapshot: &PlaybackSnapshot) -> Option<String> {
    if snapshot.duration_ms == 0 {
        return None;
    }
    Some(format!(
        "{} / {}",
        format_millis(snapshot.position_ms.min(snapshot.duration_ms)),
        format_millis(snapshot.duration_ms)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DUMP: &str = "\
MEDIA SESSION SERVICE (dumpsys media_session)
Sessions Stack - have 1 sessions:
  com.spotify.music/spotify-media-session (userId=0)
    ownerPid=4021, ownerUid=10190, userId=0
    active=true
    state=PlaybackState {state=3, position=83500, buffered position=0, speed=1.0, updated=91123, actions=3669967}
    metadata: size=7, description=Teardrop, Massive Attack, Mezzanine
    duration=330000
";

    #[test]
    fn extracts_description_with_commas() {
        let snapshot = parse_media_session("metadata: size=3, description=Foo, Bar\n");
        assert_eq!(snapshot.description, "Foo, Bar");
    }

    #[test]
    fn description_stops_at_quote_and_newline() {
        let snapshot = parse_media_session("description=Song, Artist\"tail\nnext=1");
        assert_eq!(snapshot.description, "Song, Artist");
    }

    #[test]
    fn missing_description_falls_back() {
        let snapshot = parse_media_session("state=PlaybackState {state=1}");
        assert_eq!(snapshot.description, UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn extracts_position_and_duration() {
        let snapshot =
            parse_media_session("PlaybackState{state=3, position=12345, speed=1.0}\nduration=67890");
        assert_eq!(snapshot.position_ms, 12345);
        assert_eq!(snapshot.duration_ms, 67890);
    }

    // A greedy `PlaybackState.*position=` would land on `buffered position=0`.
    #[test]
    fn position_takes_first_marker_not_buffered_position() {
        let snapshot = parse_media_session(
            "state=PlaybackState {state=3, position=4200, buffered position=0, speed=1.0}",
        );
        assert_eq!(snapshot.position_ms, 4200);
    }

    #[test]
    fn position_requires_playback_state_on_same_line() {
        let snapshot = parse_media_session("PlaybackState {state=2}\nposition=500");
        assert_eq!(snapshot.position_ms, 0);
    }

    #[test]
    fn parses_realistic_dump() {
        let snapshot = parse_media_session(SAMPLE_DUMP);
        assert_eq!(snapshot.description, "Teardrop, Massive Attack, Mezzanine");
        assert_eq!(snapshot.position_ms, 83500);
        assert_eq!(snapshot.duration_ms, 330000);
    }

    #[test]
    fn empty_input_yields_all_fallbacks() {
        let snapshot = parse_media_session("");
        assert_eq!(
            snapshot,
            PlaybackSnapshot {
                description: UNKNOWN_DESCRIPTION.to_string(),
                position_ms: 0,
                duration_ms: 0,
            }
        );
    }

    #[test]
    fn overflowing_numbers_fall_back_to_zero() {
        let snapshot = parse_media_session("duration=99999999999999999999999");
        assert_eq!(snapshot.duration_ms, 0);
    }

    #[test]
    fn sanitize_replaces_only_curly_apostrophes() {
        assert_eq!(sanitize_text("Don\u{2019}t Stop"), "Don't Stop");
        assert_eq!(sanitize_text("\u{2018}quoted\u{201C}"), "\u{2018}quoted\u{201C}");
    }

    #[test]
    fn formats_progress_only_with_duration() {
        let mut snapshot = parse_media_session(SAMPLE_DUMP);
        assert_eq!(format_progress(&snapshot).as_deref(), Some("1:23 / 5:30"));
        snapshot.duration_ms = 0;
        assert_eq!(format_progress(&snapshot), None);
        assert_eq!(format_millis(3_723_000), "1:02:03");
    }
}

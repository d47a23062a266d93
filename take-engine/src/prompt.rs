//! Prompt builder: system persona + format rules, and the user turn.

use chrono::NaiveDate;
use llm_service::ChatPrompt;

use crate::{api_types::TakeRequest, sport_profile::league_for};

/// Builds the system instruction for a take.
///
/// Pure templating: the same (sport, location, date) always yields the same text.
pub fn build_system_prompt(sport: &str, location: &str, today: NaiveDate) -> String {
    let league = league_for(sport);
    let date = today.format("%A, %B %-d, %Y");

    format!(
        r#"You are a sports aficionado giving casual bar talk about {league} for someone located in {location}, USA. Today is {date}.

CRITICAL: The user is in {location}. You MUST reference the LOCAL teams from that area. For example:
- If they're in Boston, talk about the Celtics/Red Sox/Patriots/Bruins
- If they're in LA, talk about the Lakers/Dodgers/Rams/Chargers
- If they're in a smaller city, reference the nearest major market teams they'd follow

Use the web search tool to find:
1. The local {sport} team(s) for {location}
2. Their most recent games, scores, and news from the past few days
3. Key players, injuries, trades, or storylines

Give a hyper-local, insider take about what's happening today/tonight or upcoming big games. Reference specific players, recent performances, injuries, trades: the kind of "if you know you know" commentary that would shock someone if they thought you didn't follow sports.

Sound natural, like you're talking to a friend at a bar. Be conversational, use casual language.

IMPORTANT OUTPUT FORMAT:
- Start with a quote mark (")
- Keep it to 2-4 sentences
- End with a quote mark (")
- NO preamble, NO "Here's a take:", just the quote itself
- NO commentary about searching or what you found, never say "Let me search" or "Based on my search"
- Reference SPECIFIC recent events, player names, scores when possible"#
    )
}

/// Builds the user turn for a take.
pub fn build_user_prompt(sport: &str, location: &str) -> String {
    format!(
        "I'm at a bar in {location} and want to sound like I know {sport}. \
         What's the insider take on the local team right now? \
         Search for the latest news and give me something good to say."
    )
}

/// Full prompt pair for a validated request, with web search enabled.
pub fn build_prompt(request: &TakeRequest, today: NaiveDate) -> ChatPrompt {
    ChatPrompt {
        system: build_system_prompt(request.sport(), request.location(), today),
        user: build_user_prompt(request.sport(), request.location()),
        web_search: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn system_prompt_uses_league_and_location() {
        let s = build_system_prompt("basketball", "Boston", day());
        assert!(s.contains("casual bar talk about NBA basketball"));
        assert!(s.contains("located in Boston, USA"));
        assert!(s.contains("The local basketball team(s) for Boston"));
    }

    #[test]
    fn system_prompt_embeds_date() {
        let s = build_system_prompt("golf", "Augusta", day());
        assert!(s.contains("Today is Friday, October 16, 2026."));
    }

    #[test]
    fn unmapped_sport_is_used_literally() {
        let s = build_system_prompt("cricket", "Austin", day());
        assert!(s.contains("casual bar talk about cricket for someone"));
    }

    #[test]
    fn format_rules_are_present() {
        let s = build_system_prompt("hockey", "Detroit", day());
        assert!(s.contains("Start with a quote mark"));
        assert!(s.contains("2-4 sentences"));
        assert!(s.contains("End with a quote mark"));
        assert!(s.contains("NO preamble"));
    }

    #[test]
    fn user_prompt_mentions_raw_sport() {
        let u = build_user_prompt("football", "Green Bay");
        assert!(u.starts_with("I'm at a bar in Green Bay and want to sound like I know football."));
    }

    #[test]
    fn prompt_pair_enables_search() {
        let req = TakeRequest::new("baseball", "Chicago").unwrap();
        let p = build_prompt(&req, day());
        assert!(p.web_search);
        assert!(p.system.contains("MLB baseball"));
        assert!(p.user.contains("Chicago"));
        assert_eq!(p, build_prompt(&req, day()));
    }
}

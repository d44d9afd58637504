//! Pure call logic: dial preconditions, ringing replies and relaying rules.
//!
//! The command in the parent module feeds gateway messages in and performs
//! whatever [`CallAction`]s come back.

use crate::database::TelephoneLineModel;
use std::time::Duration;

pub const RING_TIMEOUT: Duration = Duration::from_secs(60);
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(60);
pub const MAX_CALL_DURATION: Duration = Duration::from_secs(60);

pub const PICKUP: &str = "pickup";
pub const HANGUP: &str = "hangup";

/// Everything known about both ends before a call is placed
pub struct DialFacts<'a> {
    pub caller_guild: i64,
    pub target_guild: i64,
    pub caller_line: Option<&'a TelephoneLineModel>,
    pub target_line: Option<&'a TelephoneLineModel>,
    pub target_reachable: bool,
    pub blocked: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DialRejection {
    SelfCall,
    NoCallerLine,
    NoTargetLine,
    TargetBusy,
    TargetUnreachable,
    Blocked,
}

/// Applies the dial preconditions in order, first failure wins
pub fn check_dial(facts: &DialFacts<'_>) -> Result<(), DialRejection> {
    if facts.caller_guild == facts.target_guild {
        return Err(DialRejection::SelfCall);
    }
    if facts.caller_line.is_none() {
        return Err(DialRejection::NoCallerLine);
    }
    let Some(target) = facts.target_line else {
        return Err(DialRejection::NoTargetLine);
    };
    if target.is_line_busy {
        return Err(DialRejection::TargetBusy);
    }
    if !facts.target_reachable {
        return Err(DialRejection::TargetUnreachable);
    }
    if facts.blocked {
        return Err(DialRejection::Blocked);
    }
    Ok(())
}

impl DialRejection {
    /// Reply shown to the caller. `target` is the display form of the dialled server
    pub fn message(self, caller_mention: &str, target: &str) -> String {
        match self {
            DialRejection::SelfCall => "Can't make a self call".to_string(),
            DialRejection::NoCallerLine => format!(
                "{caller_mention} no telephone line channel is set for this server, \
                 ask your Server Manager to fix this."
            ),
            DialRejection::NoTargetLine => format!(
                "{caller_mention} no telephone line channel is set for the **{target}** server, \
                 or the number you entered do not match with any other server!"
            ),
            DialRejection::TargetBusy => {
                format!("Can not make a connection to **{target}**. Line busy!")
            }
            DialRejection::TargetUnreachable => "Calling failed! Possible reasons: \
                 `Channel deleted`, missing `View Channels` permission."
                .to_string(),
            DialRejection::Blocked => {
                "Calling failed! Possible reasons: They blocked You, You blocked Them.".to_string()
            }
        }
    }
}

/// Which end of the call a message came from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Caller,
    Callee,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Caller => Side::Callee,
            Side::Callee => Side::Caller,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RingReply {
    Pickup,
    Hangup,
}

/// `pickup` or `hangup`, case-insensitive, nothing else
pub fn parse_ring_reply(content: &str) -> Option<RingReply> {
    let content = content.trim();
    if content.eq_ignore_ascii_case(PICKUP) {
        Some(RingReply::Pickup)
    } else if content.eq_ignore_ascii_case(HANGUP) {
        Some(RingReply::Hangup)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndReason {
    HungUp,
    Inactive,
    MaxDuration,
}

impl EndReason {
    /// Notice for one side. `peer` is the display form of the other server
    pub fn notice(self, peer: &str) -> String {
        match self {
            EndReason::HungUp => "Disconnected".to_string(),
            EndReason::Inactive => format!(
                "Line disconnected from **{peer}**. Reason: Line Inactive for more than 60 seconds"
            ),
            EndReason::MaxDuration => {
                "Disconnected. Call duration reached its maximum limit".to_string()
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallAction {
    Relay { to: Side, text: String },
    End(EndReason),
}

/// Decides what a message said during a connected call leads to.
///
/// `elapsed` is the time since pickup, measured after the message arrived.
pub fn on_call_message(
    from: Side,
    author: &str,
    content: &str,
    elapsed: Duration,
    max_duration: Duration,
) -> Vec<CallAction> {
    if content.trim().eq_ignore_ascii_case(HANGUP) {
        return vec![CallAction::End(EndReason::HungUp)];
    }

    let mut actions = vec![CallAction::Relay {
        to: from.other(),
        text: format!("**{author}** {content}"),
    }];
    if elapsed >= max_duration {
        actions.push(CallAction::End(EndReason::MaxDuration));
    }
    actions
}

/// Discord snowflakes fit in an `i64`, which is how they are stored
pub fn parse_server_id(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0 && *id <= i64::MAX as u64)
}

/// `id (name)` as shown in call notices
pub fn describe_guild(id: u64, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{id} ({name})"),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(guild_id: i64, busy: bool) -> TelephoneLineModel {
        TelephoneLineModel {
            guild_id,
            channel_id: guild_id * 10,
            ping_role_id: None,
            member_ping_id: None,
            is_line_busy: busy,
        }
    }

    fn facts<'a>(
        caller: Option<&'a TelephoneLineModel>,
        target: Option<&'a TelephoneLineModel>,
    ) -> DialFacts<'a> {
        DialFacts {
            caller_guild: 1,
            target_guild: 2,
            caller_line: caller,
            target_line: target,
            target_reachable: true,
            blocked: false,
        }
    }

    #[test]
    fn dial_preconditions_run_in_order() {
        let caller = line(1, false);
        let idle = line(2, false);
        let busy = line(2, true);

        let mut self_call = facts(None, None);
        self_call.target_guild = 1;
        assert_eq!(check_dial(&self_call), Err(DialRejection::SelfCall));

        assert_eq!(check_dial(&facts(None, Some(&idle))), Err(DialRejection::NoCallerLine));
        assert_eq!(check_dial(&facts(Some(&caller), None)), Err(DialRejection::NoTargetLine));

        let mut busy_and_blocked = facts(Some(&caller), Some(&busy));
        busy_and_blocked.blocked = true;
        assert_eq!(check_dial(&busy_and_blocked), Err(DialRejection::TargetBusy));

        let mut unreachable = facts(Some(&caller), Some(&idle));
        unreachable.target_reachable = false;
        unreachable.blocked = true;
        assert_eq!(check_dial(&unreachable), Err(DialRejection::TargetUnreachable));

        let mut blocked = facts(Some(&caller), Some(&idle));
        blocked.blocked = true;
        assert_eq!(check_dial(&blocked), Err(DialRejection::Blocked));

        assert_eq!(check_dial(&facts(Some(&caller), Some(&idle))), Ok(()));
    }

    #[test]
    fn rejection_messages_are_single_sentences() {
        assert_eq!(
            DialRejection::NoTargetLine.message("@polly", "42"),
            "@polly no telephone line channel is set for the **42** server, \
             or the number you entered do not match with any other server!"
        );
        assert_eq!(
            DialRejection::TargetUnreachable.message("@polly", "42"),
            concat!(
                "Calling failed! Possible reasons: ",
                "`Channel deleted`, missing `View Channels` permission."
            )
        );
        assert!(!DialRejection::NoCallerLine.message("@polly", "42").contains("  "));
    }

    #[test]
    fn ring_replies_ignore_case_only() {
        assert_eq!(parse_ring_reply("PickUp"), Some(RingReply::Pickup));
        assert_eq!(parse_ring_reply(" hangup "), Some(RingReply::Hangup));
        assert_eq!(parse_ring_reply("pick up"), None);
    }

    #[test]
    fn messages_relay_to_the_other_side() {
        let actions = on_call_message(
            Side::Callee,
            "polly",
            "hello there",
            Duration::from_secs(5),
            MAX_CALL_DURATION,
        );
        assert_eq!(
            actions,
            vec![CallAction::Relay {
                to: Side::Caller,
                text: "**polly** hello there".to_string()
            }]
        );
    }

    #[test]
    fn hangup_ends_without_relay() {
        let actions =
            on_call_message(Side::Caller, "polly", "HANGUP", Duration::ZERO, MAX_CALL_DURATION);
        assert_eq!(actions, vec![CallAction::End(EndReason::HungUp)]);
    }

    #[test]
    fn duration_limit_is_checked_after_relaying() {
        let actions = on_call_message(
            Side::Caller,
            "polly",
            "still here",
            Duration::from_secs(61),
            MAX_CALL_DURATION,
        );
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], CallAction::Relay { to: Side::Callee, .. }));
        assert_eq!(actions[1], CallAction::End(EndReason::MaxDuration));
    }

    #[test]
    fn server_ids_must_be_positive_snowflakes() {
        assert_eq!(parse_server_id(" 741614468546560092 "), Some(741614468546560092));
        assert_eq!(parse_server_id("0"), None);
        assert_eq!(parse_server_id("-5"), None);
        assert_eq!(parse_server_id("abc"), None);
        assert_eq!(parse_server_id(&u64::MAX.to_string()), None);
    }

    #[test]
    fn notices_name_the_peer() {
        let peer = describe_guild(42, Some("Bird House"));
        assert_eq!(
            EndReason::Inactive.notice(&peer),
            "Line disconnected from **42 (Bird House)**. \
             Reason: Line Inactive for more than 60 seconds"
        );
        assert_eq!(describe_guild(7, None), "7");
        assert_eq!(
            DialRejection::TargetBusy.message("@a", &peer),
            "Can not make a connection to **42 (Bird House)**. Line busy!"
        );
    }
}

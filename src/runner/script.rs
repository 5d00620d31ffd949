use std::time::Duration;

/// One scripted send: wait `delay`, then transmit `line`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandStep {
    pub delay: Duration,
    pub line: String,
}

impl CommandStep {
    pub fn new(delay_ms: u64, line: impl Into<String>) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            line: line.into(),
        }
    }
}

/// An ordered, fixed-delay chat-command schedule.
///
/// Steps run strictly in sequence; `settle` is a trailing wait after the
/// last send, before the script is considered done.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandScript {
    pub steps: Vec<CommandStep>,
    pub settle: Duration,
}

/// Authentication sequence, run once the server has spawned the client:
/// `/login <tag>` at +2000ms and the group switch at +4000ms from spawn.
pub fn login_script(anarchy: &str) -> CommandScript {
    CommandScript {
        steps: vec![
            CommandStep::new(2000, format!("/login {}", anarchy)),
            CommandStep::new(2000, format!("/{}", anarchy)),
        ],
        settle: Duration::ZERO,
    }
}

/// Transfer sequence: let the connection settle, switch to the right server
/// group, then submit the pay command twice. The server needs the duplicate
/// submission to execute the transfer reliably.
pub fn transfer_script(anarchy: &str, player: &str, amount: i64) -> CommandScript {
    let pay = format!("/pay {} {}", player, amount);
    CommandScript {
        steps: vec![
            CommandStep::new(3000, format!("/{}", anarchy)),
            CommandStep::new(3000, pay.clone()),
            CommandStep::new(2000, pay),
        ],
        settle: Duration::from_millis(3000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_script_switches_group_four_seconds_after_spawn() {
        let script = login_script("an210");
        assert_eq!(
            script.steps,
            vec![
                CommandStep::new(2000, "/login an210"),
                CommandStep::new(2000, "/an210"),
            ]
        );
        assert_eq!(script.settle, Duration::ZERO);
    }

    #[test]
    fn transfer_script_pays_twice_with_two_second_gap() {
        let script = transfer_script("an145", "Steve", 500);
        assert_eq!(
            script.steps,
            vec![
                CommandStep::new(3000, "/an145"),
                CommandStep::new(3000, "/pay Steve 500"),
                CommandStep::new(2000, "/pay Steve 500"),
            ]
        );
        assert_eq!(script.settle, Duration::from_millis(3000));
    }
}

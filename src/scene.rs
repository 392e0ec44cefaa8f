use std::io::Write;

use anyhow::Context;
use pythagoras_distance::{GridConfig, Token};
use tracing::{info, warn};

use crate::settings::{Settings, UserSettings};

const NOTIFY_PREFIX: &str = "Pythagoras | ";

/// The tabletop as seen by the report: scene state in, notifications and chat out.
pub trait Host {
    /// Grid parameters of the active scene.
    fn grid(&self) -> &GridConfig;

    /// The user running the report.
    fn user(&self) -> &UserSettings;

    /// Tokens the user currently has selected.
    fn controlled_tokens(&self) -> Vec<Token>;

    /// Tokens the user owns, selected or not.
    fn owned_tokens(&self) -> Vec<Token>;

    /// Tokens the user has targeted.
    fn targeted_tokens(&self) -> Vec<Token>;

    /// Show a non-fatal warning to the user.
    fn notify_warning(&mut self, message: &str);

    /// Post a chat message visible only to `recipient`.
    fn whisper(&mut self, recipient: &str, content: &str) -> anyhow::Result<()>;
}

/// Pick the tokens to measure from.
///
/// Selected tokens win. With nothing selected, players fall back to the
/// tokens they own; privileged users get a warning and no sources.
pub fn select_sources(host: &mut impl Host) -> Vec<Token> {
    let controlled = host.controlled_tokens();
    if !controlled.is_empty() {
        return controlled;
    }
    if host.user().role.falls_back_to_owned() {
        return host.owned_tokens();
    }
    host.notify_warning("No tokens selected, and no controlled token fallback for GMs");
    Vec::new()
}

/// Pick the tokens to measure to, warning when there are none.
pub fn select_targets(host: &mut impl Host) -> Vec<Token> {
    let targets = host.targeted_tokens();
    if targets.is_empty() {
        host.notify_warning("No targets selected");
    }
    targets
}

struct SceneToken {
    token: Token,
    controlled: bool,
    owned: bool,
    targeted: bool,
}

/// A [`Host`] backed by a loaded scene snapshot that whispers into a writer.
pub struct SceneHost<W: Write> {
    grid: GridConfig,
    user: UserSettings,
    tokens: Vec<SceneToken>,
    chat: W,
    notifications: Vec<String>,
}

impl<W: Write> SceneHost<W> {
    pub fn new(settings: &Settings, chat: W) -> anyhow::Result<Self> {
        let tokens = settings
            .tokens
            .iter()
            .map(|t| {
                let token = t
                    .to_token()
                    .with_context(|| format!("token '{}' has an invalid position", t.name))?;
                Ok(SceneToken {
                    token,
                    controlled: t.controlled,
                    owned: t.owned,
                    targeted: t.targeted,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        info!(user = %settings.user.name, tokens = tokens.len(), "Scene loaded");
        Ok(SceneHost {
            grid: settings.grid.clone(),
            user: settings.user.clone(),
            tokens,
            chat,
            notifications: Vec::new(),
        })
    }

    /// Warnings shown to the user so far.
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    #[cfg(test)]
    pub fn into_chat(self) -> W {
        self.chat
    }

    fn tokens_where(&self, pick: impl Fn(&SceneToken) -> bool) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|t| pick(t))
            .map(|t| t.token.clone())
            .collect()
    }
}

impl<W: Write> Host for SceneHost<W> {
    fn grid(&self) -> &GridConfig {
        &self.grid
    }

    fn user(&self) -> &UserSettings {
        &self.user
    }

    fn controlled_tokens(&self) -> Vec<Token> {
        self.tokens_where(|t| t.controlled)
    }

    fn owned_tokens(&self) -> Vec<Token> {
        self.tokens_where(|t| t.owned)
    }

    fn targeted_tokens(&self) -> Vec<Token> {
        self.tokens_where(|t| t.targeted)
    }

    fn notify_warning(&mut self, message: &str) {
        warn!("{}{}", NOTIFY_PREFIX, message);
        self.notifications.push(format!("{}{}", NOTIFY_PREFIX, message));
    }

    fn whisper(&mut self, recipient: &str, content: &str) -> anyhow::Result<()> {
        writeln!(self.chat, "[whisper to {}] {}", recipient, content)
            .context("failed to write chat message")?;
        self.chat.flush().context("failed to flush chat")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::parse_settings;

    fn scene(role: &str, tokens: &str) -> SceneHost<Vec<u8>> {
        let toml = format!(
            "[grid]\nsize = 100\ndistance = 5\nunits = \"ft\"\n\
             [user]\nname = \"Alice\"\nrole = \"{}\"\n{}",
            role, tokens
        );
        let settings = parse_settings(&toml).unwrap();
        SceneHost::new(&settings, Vec::new()).unwrap()
    }

    const TOKENS: &str = r#"
        [[tokens]]
        name = "Paladin"
        x = 0
        y = 0
        owned = true

        [[tokens]]
        name = "Ogre"
        x = 300
        y = 0
        targeted = true
    "#;

    fn names(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_controlled_tokens_win() {
        let mut host = scene(
            "player",
            r#"
            [[tokens]]
            name = "Paladin"
            x = 0
            y = 0
            owned = true

            [[tokens]]
            name = "Familiar"
            x = 100
            y = 0
            controlled = true
            "#,
        );
        assert_eq!(names(&select_sources(&mut host)), vec!["Familiar"]);
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn test_player_falls_back_to_owned() {
        let mut host = scene("player", TOKENS);
        assert_eq!(names(&select_sources(&mut host)), vec!["Paladin"]);
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn test_gamemaster_has_no_fallback() {
        let mut host = scene("gamemaster", TOKENS);
        assert!(select_sources(&mut host).is_empty());
        assert_eq!(
            host.notifications(),
            ["Pythagoras | No tokens selected, and no controlled token fallback for GMs"]
        );
    }

    #[test]
    fn test_no_targets_warns() {
        let mut host = scene(
            "player",
            r#"
            [[tokens]]
            name = "Paladin"
            x = 0
            y = 0
            controlled = true
            "#,
        );
        assert!(select_targets(&mut host).is_empty());
        assert_eq!(host.notifications(), ["Pythagoras | No targets selected"]);
    }

    #[test]
    fn test_targets_selected() {
        let mut host = scene("player", TOKENS);
        assert_eq!(names(&select_targets(&mut host)), vec!["Ogre"]);
    }

    #[test]
    fn test_whisper_writes_to_chat() {
        let mut host = scene("player", TOKENS);
        host.whisper("Alice", "<p>hello</p>").unwrap();
        let chat = String::from_utf8(host.into_chat()).unwrap();
        assert_eq!(chat, "[whisper to Alice] <p>hello</p>\n");
    }
}

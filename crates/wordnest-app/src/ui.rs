use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use wordnest_config::Config;
use wordnest_config::ui::UiConfig;
use wordnest_types::{AppEvent, LookupResult, Provider, UiEvent};

const HELP: &str = "\
Commands:
  load <file>            open a dictionary package
  lookup <term>          look a term up (alias: l)
  play [term]            play the pronunciation of a term
  translate <text>       translate with the default provider (alias: t)
  deepl <text>           translate with DeepL
  gemini <text>          translate with Gemini
  add [term]             save a term, default is the last lookup or translation
  words                  show the wordbook
  quit                   exit";

/// What the front end should do with one input line
#[derive(Debug)]
pub enum UiCommand {
    Send(AppEvent),
    Help,
    Quit,
    Nothing,
    Invalid(String),
}

/// Front-end state, updated from backend events
#[derive(Debug, Default)]
pub struct UiState {
    pub busy: bool,
    pub last_term: Option<String>,
    pub last_source: Option<String>,
    pub default_provider: Provider,
}

impl UiState {
    pub fn new(default_provider: Provider) -> Self {
        Self {
            default_provider,
            ..Default::default()
        }
    }

    pub fn observe(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ShowEntry { term, .. } => self.last_term = Some(term.clone()),
            AppEvent::ShowTranslation { source, .. } => self.last_source = Some(source.clone()),
            AppEvent::TranslationBusy(busy) => self.busy = *busy,
            _ => {}
        }
    }

    fn translate(&mut self, text: &str, provider: Provider) -> UiCommand {
        // Trigger stays disabled until the backend reports idle
        if self.busy {
            return UiCommand::Invalid("A translation is already running".to_string());
        }
        self.busy = true;
        UiCommand::Send(AppEvent::Translate {
            text: text.to_string(),
            provider,
        })
    }

    pub fn parse_command(&mut self, line: &str) -> UiCommand {
        let line = line.trim();
        if line.is_empty() {
            return UiCommand::Nothing;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "help" | "?" => UiCommand::Help,
            "quit" | "exit" => UiCommand::Quit,
            "load" if rest.is_empty() => UiCommand::Invalid("usage: load <file>".to_string()),
            "load" => UiCommand::Send(AppEvent::LoadDictionary(PathBuf::from(rest))),
            "lookup" | "l" if rest.is_empty() => {
                UiCommand::Invalid("usage: lookup <term>".to_string())
            }
            "lookup" | "l" => UiCommand::Send(AppEvent::Lookup(rest.to_string())),
            "play" => match self.term_or_last(rest, false) {
                Some(term) => UiCommand::Send(AppEvent::PlayPronunciation(term)),
                None => UiCommand::Invalid("usage: play <term>".to_string()),
            },
            "translate" | "t" => self.translate(rest, self.default_provider),
            "deepl" => self.translate(rest, Provider::DeepL),
            "gemini" => self.translate(rest, Provider::Gemini),
            "add" => match self.term_or_last(rest, true) {
                Some(term) => UiCommand::Send(AppEvent::AddWord(term)),
                None => UiCommand::Invalid("Nothing to save yet".to_string()),
            },
            "words" => UiCommand::Send(AppEvent::ShowWordbook),
            other => UiCommand::Invalid(format!("Unknown command '{other}', try `help`")),
        }
    }

    fn term_or_last(&self, rest: &str, include_translation: bool) -> Option<String> {
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
        self.last_term
            .clone()
            .or_else(|| include_translation.then(|| self.last_source.clone()).flatten())
    }
}

/// Text shown for a backend event, if any
pub fn render_event(event: &AppEvent, ui: &UiConfig) -> Option<String> {
    let text = match event {
        AppEvent::BackendReady => "Ready. Type `help` for commands.".to_string(),
        AppEvent::DictionaryLoaded { name, entry_count } => {
            format!("Loaded dictionary '{name}' ({entry_count} entries)")
        }
        AppEvent::ShowEntry { term, result } => match result {
            LookupResult::Found(markup) => format!("{term}\n{}", render_markup(markup)),
            LookupResult::NotFound => format!("{term}: {}", ui.not_found_message),
            LookupResult::NoDictionary => {
                "No dictionary loaded. Use `load <file>` first.".to_string()
            }
        },
        AppEvent::ShowTranslation { text, provider, .. } => format!("[{provider}] {text}"),
        AppEvent::TranslationFailed(reason) => format!("Translation failed: {reason}"),
        AppEvent::WordbookUpdated(terms) if terms.is_empty() => "Wordbook is empty".to_string(),
        AppEvent::WordbookUpdated(terms) => {
            let mut out = format!("Wordbook ({}):", terms.len());
            for term in terms {
                out.push_str("\n  ");
                out.push_str(term);
            }
            out
        }
        AppEvent::Status(message) => message.clone(),
        _ => return None,
    };
    Some(text)
}

/// Flatten entry markup for the terminal
pub fn render_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            text.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let tag = rest[start + 1..start + end].trim().to_lowercase();
        let name = tag.trim_start_matches('/').split([' ', '/']).next().unwrap_or("");
        if matches!(name, "br" | "p" | "div" | "li" | "tr") && !text.ends_with('\n') {
            text.push('\n');
        }
        rest = &rest[start + end + 1..];
    }
    text.push_str(rest);

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Terminal front end: stdin commands in, rendered events out
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (ui_config, default_provider) = {
        let config = config.read().await;
        (config.ui.clone(), config.translator.default_provider)
    };

    let mut state = UiState::new(default_provider);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("UI loop stopping");
                break;
            }
            event = app_to_ui_rx.recv() => {
                let event = event?;
                state.observe(&event);
                if let Some(text) = render_event(&event, &ui_config) {
                    writeln!(stdout, "{text}")?;
                    write!(stdout, "{}", ui_config.prompt)?;
                    stdout.flush()?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("Input closed");
                    break;
                };

                match state.parse_command(&line) {
                    UiCommand::Send(event) => ui_to_app_tx.send(event).await?,
                    UiCommand::Help => writeln!(stdout, "{HELP}")?,
                    UiCommand::Quit => break,
                    UiCommand::Nothing => {}
                    UiCommand::Invalid(message) => writeln!(stdout, "{message}")?,
                }
                write!(stdout, "{}", ui_config.prompt)?;
                stdout.flush()?;
            }
        }
    }

    let _ = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(command: UiCommand) -> AppEvent {
        match command {
            UiCommand::Send(event) => event,
            other => panic!("expected an event, got {other:?}"),
        }
    }

    #[test]
    fn parses_lookup_and_load() {
        let mut state = UiState::default();
        assert!(matches!(
            sent(state.parse_command("lookup  ice cream ")),
            AppEvent::Lookup(term) if term == "ice cream"
        ));
        assert!(matches!(
            sent(state.parse_command("load /tmp/en.json")),
            AppEvent::LoadDictionary(path) if path == PathBuf::from("/tmp/en.json")
        ));
        assert!(matches!(state.parse_command("load"), UiCommand::Invalid(_)));
        assert!(matches!(state.parse_command("   "), UiCommand::Nothing));
        assert!(matches!(state.parse_command("frobnicate"), UiCommand::Invalid(_)));
    }

    #[test]
    fn translate_is_disabled_while_busy() {
        let mut state = UiState::new(Provider::Gemini);

        let event = sent(state.parse_command("t guten Tag"));
        assert!(matches!(
            event,
            AppEvent::Translate { ref text, provider: Provider::Gemini } if text == "guten Tag"
        ));
        assert!(matches!(state.parse_command("deepl again"), UiCommand::Invalid(_)));

        state.observe(&AppEvent::TranslationBusy(false));
        assert!(matches!(
            sent(state.parse_command("deepl again")),
            AppEvent::Translate { provider: Provider::DeepL, .. }
        ));
    }

    #[test]
    fn empty_translation_text_is_still_sent() {
        let mut state = UiState::default();
        assert!(matches!(
            sent(state.parse_command("translate")),
            AppEvent::Translate { ref text, .. } if text.is_empty()
        ));
    }

    #[test]
    fn add_defaults_to_last_lookup_then_translation() {
        let mut state = UiState::default();
        assert!(matches!(state.parse_command("add"), UiCommand::Invalid(_)));

        state.observe(&AppEvent::ShowTranslation {
            source: "merci".into(),
            text: "thanks".into(),
            provider: Provider::DeepL,
        });
        assert!(matches!(sent(state.parse_command("add")), AppEvent::AddWord(t) if t == "merci"));

        state.observe(&AppEvent::ShowEntry {
            term: "hello".into(),
            result: LookupResult::NotFound,
        });
        assert!(matches!(sent(state.parse_command("add")), AppEvent::AddWord(t) if t == "hello"));
        assert!(matches!(sent(state.parse_command("play")), AppEvent::PlayPronunciation(t) if t == "hello"));
    }

    #[test]
    fn renders_lookup_outcomes() {
        let ui = UiConfig::default();
        let found = AppEvent::ShowEntry {
            term: "tree".into(),
            result: LookupResult::Found("<p>a <b>woody</b> plant</p><p>&amp; more</p>".into()),
        };
        assert_eq!(render_event(&found, &ui).unwrap(), "tree\na woody plant\n& more");

        let missing = AppEvent::ShowEntry {
            term: "zzz".into(),
            result: LookupResult::NotFound,
        };
        assert_eq!(render_event(&missing, &ui).unwrap(), "zzz: Not found");

        assert!(render_event(&AppEvent::TranslationBusy(true), &ui).is_none());
    }

    #[test]
    fn renders_wordbook() {
        let ui = UiConfig::default();
        let event = AppEvent::WordbookUpdated(vec!["world".into(), "hello".into()]);
        assert_eq!(render_event(&event, &ui).unwrap(), "Wordbook (2):\n  world\n  hello");
        assert_eq!(
            render_event(&AppEvent::WordbookUpdated(vec![]), &ui).unwrap(),
            "Wordbook is empty"
        );
    }

    #[test]
    fn markup_line_breaks_and_unclosed_tags() {
        assert_eq!(render_markup("one<br/>two<br>three"), "one\ntwo\nthree");
        assert_eq!(render_markup("a < b"), "a < b");
    }
}

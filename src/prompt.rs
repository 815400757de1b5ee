use std::io::{self, BufRead, Write};

use log::debug;
use thiserror::Error;

use crate::{Gamma, ParseResolutionError, Resolution, ResolutionList, ResolutionStore, StoreError};

/// Error type for the prompt module
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Invalid choice. Please use 0 for custom or 1-{max} for presets.")]
    InvalidChoice { max: usize },
    #[error("Invalid input. Please enter a number.")]
    NotANumber,
    #[error("Invalid format. Please use WIDTHxHEIGHT (e.g., 1440x1080)")]
    InvalidFormat(#[source] ParseResolutionError),
    #[error("Failed to save the resolution list")]
    Store(#[from] StoreError),
    #[error("Console I/O failed")]
    Io(#[from] io::Error),
}

impl PromptError {
    /// Whether the error comes from what the user typed rather than the system.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PromptError::InvalidChoice { .. } | PromptError::NotANumber | PromptError::InvalidFormat(_)
        )
    }
}

pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Line-based question and answer over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, line: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Prints `question` without a newline and reads the trimmed answer.
    /// End of input reads as an empty answer.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Shows the menu and returns the chosen resolution. Choice `0` runs the
/// custom entry flow, which may extend `list` and persist it to `store`.
pub fn select_resolution<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    list: &mut ResolutionList,
    current: Resolution,
    store: &ResolutionStore,
) -> PromptResult<Resolution> {
    console.say(format_args!("Current resolution: {}", current))?;
    console.say("Choose a resolution:")?;
    console.say("0 - Custom (e.g. 1440x1080)")?;
    for (number, resolution) in list.iter().enumerate() {
        console.say(format_args!("{} - {}", number + 1, resolution))?;
    }

    let choice = console.ask("Enter your choice: ")?;
    if choice == "0" {
        return custom_resolution(console, list, store);
    }

    let number: i64 = choice.parse().map_err(|_| PromptError::NotANumber)?;
    usize::try_from(number)
        .ok()
        .and_then(|number| list.get_numbered(number))
        .ok_or(PromptError::InvalidChoice { max: list.len() })
}

/// Reads a `WIDTHxHEIGHT` resolution and offers to remember it.
pub fn custom_resolution<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    list: &mut ResolutionList,
    store: &ResolutionStore,
) -> PromptResult<Resolution> {
    let answer = console.ask("Enter custom resolution (WIDTHxHEIGHT): ")?;
    let resolution: Resolution = answer.parse().map_err(PromptError::InvalidFormat)?;

    let save = console.ask("Save this resolution for future use? (Y/N): ")?;
    if save.eq_ignore_ascii_case("y") {
        if list.insert_unique(resolution) {
            store.save(list)?;
        } else {
            debug!("{} is already stored", resolution);
        }
    }

    Ok(resolution)
}

/// Asks for a gamma exponent. `0` picks `preset`; anything unusable yields
/// `None` after telling the user the step is skipped.
pub fn prompt_gamma<R: BufRead, W: Write>(console: &mut Console<R, W>, preset: Gamma) -> PromptResult<Option<Gamma>> {
    let answer = console.ask(&format!("Change gamma to (0 = {}, 1 = default): ", preset))?;
    if answer == "0" {
        return Ok(Some(preset));
    }

    match answer.parse::<Gamma>() {
        Ok(gamma) => Ok(Some(gamma)),
        Err(err) => {
            debug!("Rejected gamma {:?}: {}", answer, err);
            console.say("Invalid gamma value. Skipping gamma adjustment.")?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, ResolutionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResolutionStore::new(dir.path().join("resolutions.json"));
        (dir, store)
    }

    #[test]
    fn menu_lists_entries_from_one() {
        let (_dir, store) = temp_store();
        let mut list = ResolutionList::defaults();
        let mut console = console("2\n");

        let chosen = select_resolution(&mut console, &mut list, Resolution::new(1920, 1080), &store).unwrap();

        assert_eq!(chosen, Resolution::new(1680, 1050));
        let text = output(console);
        assert!(text.starts_with("Current resolution: 1920x1080\nChoose a resolution:\n0 - Custom (e.g. 1440x1080)\n"));
        assert!(text.contains("1 - 1920x1080\n2 - 1680x1050\n3 - 1440x1080\n4 - 1280x960\n"));
        assert!(text.ends_with("Enter your choice: "));
    }

    #[test]
    fn out_of_range_choice_is_rejected_without_saving() {
        let (_dir, store) = temp_store();
        for input in ["5\n", "-1\n", "99999999999999999\n"] {
            let mut list = ResolutionList::defaults();
            let err = select_resolution(&mut console(input), &mut list, Resolution::new(1920, 1080), &store)
                .unwrap_err();

            assert!(matches!(err, PromptError::InvalidChoice { max: 4 }), "{}", input);
            assert_eq!(err.to_string(), "Invalid choice. Please use 0 for custom or 1-4 for presets.");
        }
        assert!(!store.path().exists());
    }

    #[test]
    fn non_numeric_choice_is_rejected() {
        let (_dir, store) = temp_store();
        let mut list = ResolutionList::defaults();

        let err = select_resolution(&mut console("two\n"), &mut list, Resolution::new(1920, 1080), &store)
            .unwrap_err();

        assert!(matches!(err, PromptError::NotANumber));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn custom_entry_without_saving_leaves_store_untouched() {
        let (_dir, store) = temp_store();
        let mut list = ResolutionList::defaults();

        let chosen = select_resolution(&mut console("0\n1440x1080\nN\n"), &mut list, Resolution::new(1920, 1080), &store)
            .unwrap();

        assert_eq!(chosen, Resolution::new(1440, 1080));
        assert!(!store.path().exists());
        assert_eq!(list, ResolutionList::defaults());
    }

    #[test]
    fn custom_entry_is_saved_once() {
        let (_dir, store) = temp_store();
        store.save(&ResolutionList::defaults()).unwrap();

        for _ in 0..2 {
            let mut list = store.load();
            let chosen = select_resolution(&mut console("0\n1366x768\ny\n"), &mut list, Resolution::new(1920, 1080), &store)
                .unwrap();
            assert_eq!(chosen, Resolution::new(1366, 768));
        }

        let stored = store.load();
        assert_eq!(stored.len(), 5);
        assert_eq!(stored.get_numbered(5), Some(Resolution::new(1366, 768)));
    }

    #[test]
    fn saving_a_listed_resolution_does_not_rewrite_the_file() {
        let (_dir, store) = temp_store();
        let mut list = ResolutionList::defaults();

        let chosen = custom_resolution(&mut console("1440x1080\nY\n"), &mut list, &store).unwrap();

        assert_eq!(chosen, Resolution::new(1440, 1080));
        assert!(!store.path().exists());
    }

    #[test]
    fn malformed_custom_entry_is_rejected() {
        let (_dir, store) = temp_store();
        let mut list = ResolutionList::defaults();

        let err = custom_resolution(&mut console("1440*1080\ny\n"), &mut list, &store).unwrap_err();

        assert!(matches!(err, PromptError::InvalidFormat(_)));
        assert_eq!(err.to_string(), "Invalid format. Please use WIDTHxHEIGHT (e.g., 1440x1080)");
        assert!(!store.path().exists());
    }

    #[test]
    fn only_typed_input_counts_as_invalid_input() {
        let format = "1440".parse::<Resolution>().unwrap_err();

        assert!(PromptError::InvalidFormat(format).is_invalid_input());
        assert!(PromptError::InvalidChoice { max: 4 }.is_invalid_input());
        assert!(PromptError::NotANumber.is_invalid_input());
        assert!(!PromptError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "closed")).is_invalid_input());
    }

    #[test]
    fn gamma_zero_selects_preset() {
        let preset = Gamma::new(1.5).unwrap();
        let mut console = console("0\n");

        assert_eq!(prompt_gamma(&mut console, preset).unwrap(), Some(preset));
        assert_eq!(output(console), "Change gamma to (0 = 1.5, 1 = default): ");
    }

    #[test]
    fn gamma_accepts_explicit_values() {
        let preset = Gamma::new(1.5).unwrap();

        assert_eq!(prompt_gamma(&mut console("2.2\n"), preset).unwrap(), Some(Gamma::new(2.2).unwrap()));
        assert_eq!(prompt_gamma(&mut console("1\n"), preset).unwrap(), Some(Gamma::LINEAR));
    }

    #[test]
    fn invalid_gamma_is_skipped() {
        let preset = Gamma::new(1.5).unwrap();
        for input in ["abc\n", "0.0\n", "-1\n", "nan\n", ""] {
            let mut console = console(input);
            assert_eq!(prompt_gamma(&mut console, preset).unwrap(), None, "{:?}", input);
            assert!(output(console).ends_with("Invalid gamma value. Skipping gamma adjustment.\n"));
        }
    }
}

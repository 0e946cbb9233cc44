//! Interactive, prompt-per-setting configuration.

use std::io::{self, BufRead, Write};

use tracing::debug;

use super::settings::SettingName;
use super::store::SettingsStore;

/// Walks every setting, prompting for a new value.
///
/// Blank input keeps the current value. Input that fails validation is
/// reported and the current value is kept. Returns the number of settings
/// that changed. The caller decides whether to [`save`](SettingsStore::save).
///
/// # Errors
///
/// Returns any IO error from reading `input` or writing `output`.
pub fn prompt_settings<R, W>(
    store: &mut SettingsStore,
    input: &mut R,
    output: &mut W,
) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut changed = 0;
    for name in SettingName::ALL {
        let current = store.get(name);
        write!(output, "{name} [{current}]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF: keep everything that is left.
            writeln!(output)?;
            break;
        }
        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }

        match store.set(name, answer) {
            Ok(value) => {
                if value != current {
                    changed += 1;
                }
            }
            Err(error) => {
                writeln!(output, "{error}. Keeping `{current}`.")?;
            }
        }
    }
    debug!(changed, "Interactive configuration finished");
    Ok(changed)
}

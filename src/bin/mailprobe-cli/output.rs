#[cfg(feature = "with-serde")]
use anyhow::Result;

use mailprobe_lib::Verdict;

pub fn print_human(verdicts: &[Verdict]) {
    for verdict in verdicts {
        if verdict.valid {
            println!("[OK]      {} :: {}", verdict.email, verdict.reason);
        } else {
            println!("[INVALID] {} :: {}", verdict.email, verdict.reason);
        }
    }
}

#[cfg(feature = "with-serde")]
pub fn render_json(verdicts: &[Verdict]) -> Result<String> {
    Ok(serde_json::to_string_pretty(verdicts)?)
}

#[cfg(feature = "with-serde")]
pub fn render_ndjson(verdicts: &[Verdict]) -> Result<String> {
    let mut buf = String::new();
    for verdict in verdicts {
        buf.push_str(&serde_json::to_string(verdict)?);
        buf.push('\n');
    }
    Ok(buf)
}

#[cfg(feature = "with-serde")]
pub fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let tmp = format!("{}.tmp", path);
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

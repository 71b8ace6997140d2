use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::time::Duration;

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    for (key, value) in [
      (
        "search.debounce_ms",
        "300"
      ),
      (
        "placeholder.description",
        "No description"
      ),
      ("placeholder.due", "N/A"),
      (
        "confirm.delete",
        "Are you sure you want to delete \
         this task?"
      ),
      (
        "prompt.edit",
        "Enter new title:"
      ),
      ("color", "on")
    ] {
      map.insert(
        key.to_string(),
        value.to_string()
      );
    }

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  /// Defaults, then the rc file named
  /// by `rc_override`, `$TASKPANERC` or
  /// `~/.taskpanerc`, whichever comes
  /// first.
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(rc_override)?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading taskpanerc");
      cfg.load_file(&path)?;
    } else {
      warn!(
        "no taskpanerc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  /// Defaults overlaid with rc text that
  /// did not come from a file. Include
  /// directives resolve against the
  /// current directory.
  pub fn from_rc_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();
    cfg.load_text(
      text,
      Path::new("<inline>"),
      Path::new(".")
    )?;
    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    self.load_text(
      &text, &path, &base_dir
    )
  }

  fn load_text(
    &mut self,
    text: &str,
    path: &Path,
    base_dir: &Path
  ) -> anyhow::Result<()> {
    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self
            .load_file(&include_path)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

/// Typed view of the keys the widget
/// reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub search_debounce:         Duration,
  pub description_placeholder: String,
  pub due_placeholder:         String,
  pub delete_confirmation:     String,
  pub edit_prompt:             String,
  pub color:                   bool
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      search_debounce:
        Duration::from_millis(
          DEFAULT_DEBOUNCE_MS
        ),
      description_placeholder:
        "No description".to_string(),
      due_placeholder: "N/A".to_string(),
      delete_confirmation:
        "Are you sure you want to \
         delete this task?"
          .to_string(),
      edit_prompt: "Enter new title:"
        .to_string(),
      color: true
    }
  }
}

impl Settings {
  #[tracing::instrument(skip(cfg))]
  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let defaults = Settings::default();

    let search_debounce = match cfg
      .get("search.debounce_ms")
    {
      | Some(raw) => {
        let millis = raw
          .trim()
          .parse::<u64>()
          .with_context(|| {
            format!(
              "invalid \
               search.debounce_ms: \
               {raw}"
            )
          })?;
        Duration::from_millis(millis)
      }
      | None => defaults.search_debounce
    };

    Ok(Self {
      search_debounce,
      description_placeholder: cfg
        .get("placeholder.description")
        .unwrap_or(
          defaults
            .description_placeholder
        ),
      due_placeholder: cfg
        .get("placeholder.due")
        .unwrap_or(
          defaults.due_placeholder
        ),
      delete_confirmation: cfg
        .get("confirm.delete")
        .unwrap_or(
          defaults.delete_confirmation
        ),
      edit_prompt: cfg
        .get("prompt.edit")
        .unwrap_or(defaults.edit_prompt),
      color: cfg
        .get_bool("color")
        .unwrap_or(defaults.color)
    })
  }
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var("TASKPANERC")
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    debug!(
      "cannot determine home \
       directory; skipping \
       taskpanerc lookup"
    );
    return Ok(None);
  };
  let candidate =
    home.join(".taskpanerc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn defaults_match_typed_defaults() {
    let settings = Settings::from_config(
      &Config::default()
    )
    .unwrap();
    assert_eq!(
      settings,
      Settings::default()
    );
  }

  #[test]
  fn rc_file_with_include_and_overrides()
   {
    let dir = tempdir().unwrap();
    let extra = dir.path().join("extra.rc");
    fs::write(
      &extra,
      "placeholder.due = someday\n"
    )
    .unwrap();

    let rc = dir.path().join("main.rc");
    fs::write(
      &rc,
      "# widget settings\n\
       search.debounce_ms = 150 # fast\n\
       include extra.rc\n\
       include missing.rc\n"
    )
    .unwrap();

    let mut cfg =
      Config::load(Some(rc.as_path()))
        .unwrap();
    cfg.apply_overrides([(
      "rc.color".to_string(),
      "off".to_string()
    )]);
    let settings =
      Settings::from_config(&cfg).unwrap();

    assert_eq!(
      settings.search_debounce,
      Duration::from_millis(150)
    );
    assert_eq!(
      settings.due_placeholder,
      "someday"
    );
    assert!(!settings.color);
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn malformed_lines_and_values_are_errors()
   {
    assert!(
      Config::from_rc_str("not a pair")
        .is_err()
    );

    let cfg = Config::from_rc_str(
      "search.debounce_ms = soon"
    )
    .unwrap();
    assert!(
      Settings::from_config(&cfg)
        .is_err()
    );
  }
}

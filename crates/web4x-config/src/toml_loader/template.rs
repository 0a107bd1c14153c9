//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Web4x Browser Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[browser]
# default_url = "https://google.com"
# title = "Web4x Browser"
# restore_session = true

[history]
# max_entries = 100      # 1-10000
# recent_count = 5       # 1-50

[files]
# base_dir = "/home/me/web4x"   # defaults to your home directory
# confine_to_base = true        # reject paths that escape base_dir

[zoom]
# step = 0.1             # 0.01-1.0
# min = 0.1              # 0.05-1.0

[webview]
# devtools = true
# user_agent = "Web4x/0.1"

[logging]
# level = "web4x=info"
"##
    .to_string()
}

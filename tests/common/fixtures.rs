//! Test fixtures - reusable Lua sources and manifests.

/// Data module: one returned table literal
pub const ICONS: &str = r#"-- generated icon table
return {
	-- arrows
	up = "rbxassetid://1",
}
"#;

/// Behavioral module with a local container and a trailing export
pub const THEME: &str = r##"-- Theme: colors shared by every widget
local Theme = {}

Theme.Accent = "#3b82f6"

function Theme:Initialize(deps)
	self.ready = true
end

return Theme
"##;

/// Behavioral module that depends on Theme and Icons
pub const BUTTON: &str = r#"local Button = {}

function Button:Initialize(deps)
	self.Theme = deps.Theme
	self.Icons = deps.Icons
end

function Button.new(label)
	return { label = label }
end

return Button
"#;

/// Public API template; its requires point at bundled modules
pub const INIT: &str = r#"local Theme = require(script.Theme)
local Button = require(script.Button)

function Kit.Button(label)
	return Button.new(label)
end

return Kit
"#;

/// Manifest for the Icons/Theme/Button kit
pub fn kit_manifest(strategy: &str) -> String {
    format!(
        r#"[bundle]
name = "Kit"
version = "1.0.0"
strategy = "{strategy}"
api = "init.lua"

[[environment]]
name = "Players"
value = 'game:GetService("Players")'

[[modules]]
name = "Icons"
path = "src/Icons.lua"
kind = "data"

[[modules]]
name = "Theme"
path = "src/Theme.lua"

[[modules]]
name = "Button"
path = "src/Button.lua"
depends = ["Theme", "Icons"]
"#
    )
}

/// Minimal behavioral module named `name`
pub fn simple_module(name: &str) -> String {
    format!("local {name} = {{}}\n\nfunction {name}:Initialize(deps)\nend\n\nreturn {name}\n")
}

//! Markdown rendering of release notes.

use crate::config::NotesConfig;

use super::category::ClassifiedCommits;
use super::version::ReleaseVersion;

/// Bullets used when no commits were found.
const ROUTINE_UPDATE: [&str; 2] = [
    "- Version bump and maintenance",
    "- Code optimizations and performance improvements",
];

const TECHNICAL_SPECS: [&str; 5] = [
    "- **Supported browsers**: Chrome 88+, Firefox 91+, Edge 88+",
    "- **Manifest version**: V3 compatible",
    "- **Package size**: ~50KB",
    "- **Permissions**: storage, tab access, GitHub domain access",
    "- **Libraries**: JSZip, FileSaver.js",
];

const USAGE_STEPS: [&str; 4] = [
    "1. After installing, click the extension icon",
    "2. Set your GitHub Personal Access Token in the popup",
    "3. Open any GitHub repository or folder page",
    "4. Click the \"Download\" button on the page to start",
];

/// Render the complete release notes document.
///
/// Lines are joined with `\n`; the document ends with the blank line that
/// closes its last section.
pub fn compose(version: &ReleaseVersion, classified: &ClassifiedCommits, config: &NotesConfig) -> String {
    let mut notes = Vec::new();

    push_header(&mut notes, version, config);
    push_downloads(&mut notes, version, config);
    push_changes(&mut notes, classified, config);
    push_installation(&mut notes, config);
    push_usage(&mut notes);
    push_technical_specs(&mut notes);
    push_contributors(&mut notes, classified);
    push_feedback(&mut notes, config);

    notes.join("\n")
}

fn push_header(notes: &mut Vec<String>, version: &ReleaseVersion, config: &NotesConfig) {
    notes.push(format!("# 🎉 {} {}", config.project_name, version.raw));
    notes.push(String::new());
    notes.push(format!("Release date: {}", version.release_date()));
    notes.push(String::new());
    notes.push(format!("Generated at: {}", version.generated_at_display()));
    notes.push(String::new());
}

fn push_downloads(notes: &mut Vec<String>, version: &ReleaseVersion, config: &NotesConfig) {
    let assets = [
        (
            "📦 Universal Extension Package",
            config.universal_asset(&version.numeric),
            "Works in Chrome, Firefox, Edge and other browsers",
        ),
        (
            "📄 Source Code Package",
            config.source_asset(&version.numeric),
            "Complete project source code",
        ),
    ];

    notes.push("## 📥 Quick Download".to_string());
    notes.push(String::new());
    notes.push("<div align=\"center\">".to_string());
    notes.push("  <table>".to_string());
    notes.push("    <tr>".to_string());
    for (title, filename, caption) in &assets {
        notes.push("      <td align=\"center\" width=\"50%\">".to_string());
        notes.push(format!("        <h3>{}</h3>", title));
        notes.push(format!(
            "        <a href=\"{}\">",
            config.download_link(&version.raw, filename)
        ));
        notes.push(format!(
            "          <img src=\"{}\" width=\"64\" height=\"64\"><br>",
            config.icon_path
        ));
        notes.push(format!("          <strong>{}</strong>", filename));
        notes.push("        </a><br>".to_string());
        notes.push(format!("        <small>{}</small>", caption));
        notes.push("      </td>".to_string());
    }
    notes.push("    </tr>".to_string());
    notes.push("  </table>".to_string());
    notes.push("</div>".to_string());
    notes.push(String::new());
}

fn push_changes(notes: &mut Vec<String>, classified: &ClassifiedCommits, config: &NotesConfig) {
    if classified.is_empty() {
        notes.push("## 📋 This Release".to_string());
        notes.push(String::new());
        notes.extend(ROUTINE_UPDATE.iter().map(|s| s.to_string()));
        notes.push(String::new());
        return;
    }

    for (category, commits) in classified.non_empty() {
        notes.push(format!("## {}", category.heading()));
        notes.push(String::new());
        for commit in commits {
            notes.push(format!(
                "- {} ([{}]({}))",
                commit.subject,
                commit.short_hash,
                config.commit_link(&commit.short_hash)
            ));
        }
        notes.push(String::new());
    }
}

fn push_installation(notes: &mut Vec<String>, config: &NotesConfig) {
    let browsers = [
        (
            "🌟 Chrome & Edge",
            [
                "1. Download the universal ZIP and extract it",
                "2. Open <code>chrome://extensions/</code>",
                "3. Enable \"Developer mode\"",
                "4. Click \"Load unpacked\"",
            ],
        ),
        (
            "🦊 Firefox",
            [
                "1. Download the universal ZIP and extract it",
                "2. Open <code>about:debugging</code>",
                "3. Click \"This Firefox\"",
                "4. Click \"Load Temporary Add-on\"",
            ],
        ),
    ];

    notes.push("## 📦 Installation".to_string());
    notes.push(String::new());
    notes.push("<div align=\"center\">".to_string());
    notes.push("  <table>".to_string());
    notes.push("    <tr>".to_string());
    for (browser, steps) in &browsers {
        notes.push("      <td align=\"center\" width=\"50%\">".to_string());
        notes.push(format!(
            "        <img src=\"{}\" width=\"48\" height=\"48\"><br>",
            config.icon_path
        ));
        notes.push(format!("        <h3>{}</h3>", browser));
        notes.push(format!("        <p>{}</p>", steps.join("<br>\n        ")));
        notes.push("      </td>".to_string());
    }
    notes.push("    </tr>".to_string());
    notes.push("  </table>".to_string());
    notes.push("</div>".to_string());
    notes.push(String::new());
}

fn push_usage(notes: &mut Vec<String>) {
    notes.push("## 🔧 Usage".to_string());
    notes.push(String::new());
    notes.extend(USAGE_STEPS.iter().map(|s| s.to_string()));
    notes.push(String::new());
}

fn push_technical_specs(notes: &mut Vec<String>) {
    notes.push("## ⚙️ Technical Specifications".to_string());
    notes.push(String::new());
    notes.extend(TECHNICAL_SPECS.iter().map(|s| s.to_string()));
    notes.push(String::new());
}

fn push_contributors(notes: &mut Vec<String>, classified: &ClassifiedCommits) {
    let contributors = classified.contributors();
    if contributors.is_empty() {
        return;
    }

    notes.push("## 👥 Contributors".to_string());
    notes.push(String::new());
    notes.push("Thanks to everyone who contributed to this release:".to_string());
    notes.push(String::new());
    notes.extend(contributors.iter().map(|author| format!("- @{}", author)));
    notes.push(String::new());
}

fn push_feedback(notes: &mut Vec<String>, config: &NotesConfig) {
    let base = config.link_base();
    notes.push("## 💬 Feedback & Support".to_string());
    notes.push(String::new());
    notes.push(format!("- 🐛 [Report an issue]({}/issues/new)", base));
    notes.push(format!("- 💡 [Request a feature]({}/issues/new)", base));
    notes.push(format!("- 📖 [Documentation]({}/blob/main/README.md)", base));
    notes.push("- ⭐ If this extension helps you, please give us a star!".to_string());
    notes.push(String::new());
}

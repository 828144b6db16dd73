use crate::payload::NotificationPayload;
use clap::ValueEnum;

const MARKDOWN_SAMPLE: &str = "# Heading 1\n\n###### Heading 6\n\nAlt-H1\n=====\n\n**bold**\n\n_curly_\n\n~~Strike through~~\n\n[Link](google.com)\n\n* list1 \n* list2\n\n1. another list\n2. numerated\n\n![alt text](https://github.com/adam-p/markdown-here/raw/master/src/common/images/icon48.png)\n\n`some inline code`\n\n```\nA code block\n```\n\n> Blockquote";

/// Which fixture collection a run sends.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FixtureSet {
    #[default]
    Priorities,
    Formatting,
    All,
}

impl FixtureSet {
    pub fn payloads(&self) -> Vec<NotificationPayload> {
        match self {
            FixtureSet::Priorities => priorities(),
            FixtureSet::Formatting => formatting_messages(),
            FixtureSet::All => {
                let mut all = formatting_messages();
                all.extend(priorities());
                all
            }
        }
    }
}

/// Payloads probing how the service renders HTML, Markdown and line breaks.
pub fn formatting_messages() -> Vec<NotificationPayload> {
    vec![
        NotificationPayload::html("NEW TEST", "<hr>"),
        NotificationPayload::html("Linebreak single br", "line <br> break"),
        NotificationPayload::html("Linebreak single n", "line \n break"),
        NotificationPayload::html("Linebreak native", "line \n         break"),
        NotificationPayload::markdown("Markdown styling", MARKDOWN_SAMPLE),
        NotificationPayload::html("HTML", "<font data-mx-color='#AA0000'>Red</font>"),
    ]
}

/// Payloads probing priority handling, including values outside the nominal range
/// and one payload without any priority.
pub fn priorities() -> Vec<NotificationPayload> {
    let mut payloads: Vec<_> = [0, 3, 4, 15, 21, -5]
        .into_iter()
        .map(|p| NotificationPayload::html(format!("Prio {p}"), "Some text").with_priority(p))
        .collect();
    payloads.push(NotificationPayload::html("No Prio", "Some text"));
    payloads
}

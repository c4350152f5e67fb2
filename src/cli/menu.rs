//! Menu actions offered once a transcript is loaded.

/// A question asked on the user's behalf from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedQuestion {
    Summary,
    Faq,
    TableOfContents,
}

impl CannedQuestion {
    /// Question text sent to the assistant.
    pub fn question(self) -> &'static str {
        match self {
            CannedQuestion::Summary => "provide a summary of the video content",
            CannedQuestion::Faq => "provide a 5 question FAQ based on the video content",
            CannedQuestion::TableOfContents => {
                "provide a table of contents based on the video content"
            }
        }
    }
}

/// Everything the user can pick from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    PrintTranscript,
    Ask(CannedQuestion),
    Chat,
    ChangeVideo,
    Exit,
}

impl MenuAction {
    /// All actions in display order.
    pub const ALL: [MenuAction; 7] = [
        MenuAction::PrintTranscript,
        MenuAction::Ask(CannedQuestion::Summary),
        MenuAction::Chat,
        MenuAction::Ask(CannedQuestion::Faq),
        MenuAction::Ask(CannedQuestion::TableOfContents),
        MenuAction::ChangeVideo,
        MenuAction::Exit,
    ];

    /// Key the user types to pick this action.
    pub fn key(self) -> &'static str {
        match self {
            MenuAction::PrintTranscript => "1",
            MenuAction::Ask(CannedQuestion::Summary) => "2",
            MenuAction::Chat => "3",
            MenuAction::Ask(CannedQuestion::Faq) => "4",
            MenuAction::Ask(CannedQuestion::TableOfContents) => "5",
            MenuAction::ChangeVideo => "6",
            MenuAction::Exit => "0",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::PrintTranscript => "Print Punctuated Transcript",
            MenuAction::Ask(CannedQuestion::Summary) => "Summarize Transcript",
            MenuAction::Chat => "Chat with AI Assistant",
            MenuAction::Ask(CannedQuestion::Faq) => "FAQ",
            MenuAction::Ask(CannedQuestion::TableOfContents) => "Table of Contents",
            MenuAction::ChangeVideo => "Change Video",
            MenuAction::Exit => "Exit",
        }
    }

    /// Look up the action for a typed choice.
    pub fn from_choice(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        Self::ALL.into_iter().find(|action| action.key() == choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_choice(action.key()), Some(action));
        }
    }

    #[test]
    fn test_display_order() {
        let keys: Vec<_> = MenuAction::ALL.iter().map(|a| a.key()).collect();
        assert_eq!(keys, vec!["1", "2", "3", "4", "5", "6", "0"]);
    }

    #[test]
    fn test_choice_is_trimmed() {
        assert_eq!(MenuAction::from_choice(" 3 \n"), Some(MenuAction::Chat));
    }

    #[test]
    fn test_unknown_choice() {
        assert_eq!(MenuAction::from_choice("7"), None);
        assert_eq!(MenuAction::from_choice("chat"), None);
        assert_eq!(MenuAction::from_choice(""), None);
    }

    #[test]
    fn test_canned_questions() {
        assert_eq!(
            CannedQuestion::Faq.question(),
            "provide a 5 question FAQ based on the video content"
        );
        assert_eq!(
            CannedQuestion::Summary.question(),
            "provide a summary of the video content"
        );
        assert_eq!(
            CannedQuestion::TableOfContents.question(),
            "provide a table of contents based on the video content"
        );
    }
}

//! Terminal presentation: result cards, chat bubbles, notices, spinners

use geogenie_common::markup::{parse_markup, render_ansi, render_plain};
use geogenie_common::{ChatMessage, ChatRole, Notice, NoticeLevel, RecognitionView};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("✔ {}", notice.text),
        NoticeLevel::Error => println!("✖ {}", notice.text),
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Lines of the result card.
pub fn result_card(view: &RecognitionView) -> Vec<String> {
    let mut lines = vec![
        format!("📷 {}", view.image),
        String::new(),
        view.title.to_string(),
        format!("  {}", view.place),
    ];
    if let Some(confidence) = &view.confidence {
        lines.push(format!("  {}", confidence));
    }
    if !view.source.is_empty() {
        lines.push(format!("  (source: {})", view.source));
    }
    lines.push(String::new());
    lines.push(view.question.to_string());
    lines
}

/// Bot replies are rendered from their inline markup; user text is shown
/// as typed.
pub fn chat_bubble(message: &ChatMessage, ansi: bool) -> String {
    match message.role {
        ChatRole::User => format!("you › {}", message.text),
        ChatRole::Bot => {
            let blocks = parse_markup(&message.text);
            let body = if ansi {
                render_ansi(&blocks)
            } else {
                render_plain(&blocks)
            };
            let body = if body.is_empty() { message.text.clone() } else { body };
            format!("bot › {}", body.replace('\n', "\n      "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogenie_common::RecognitionHandoff;

    #[test]
    fn test_result_card_for_match() {
        let view = RecognitionView::from_handoff(&RecognitionHandoff {
            place: "india_gate".into(),
            confidence: 0.5,
            source: "db".into(),
            image: "gate.jpg".into(),
        });
        let lines = result_card(&view);
        assert!(lines.contains(&"We Found a Match!".to_string()));
        assert!(lines.contains(&"  India Gate".to_string()));
        assert!(lines.contains(&"  Confidence: 50.0%".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Is this correct?"));
    }

    #[test]
    fn test_result_card_for_unknown() {
        let view = RecognitionView::from_handoff(&RecognitionHandoff {
            place: "unknown".into(),
            image: "x.jpg".into(),
            ..Default::default()
        });
        let lines = result_card(&view);
        assert!(lines.contains(&"No Match Found".to_string()));
        assert!(lines.contains(&"  Unknown Place".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Confidence")));
    }

    #[test]
    fn test_chat_bubble_renders_bot_markup() {
        let bubble = chat_bubble(&ChatMessage::bot("<p>Hi</p><ul><li>one</li></ul>"), false);
        assert_eq!(bubble, "bot › Hi\n        • one");
        let bubble = chat_bubble(&ChatMessage::user("<b>raw</b>"), false);
        assert_eq!(bubble, "you › <b>raw</b>");
    }
}

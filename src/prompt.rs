use crate::options::GraduationOptions;

const CUSTOM_TEXT_MAX_CHARS: usize = 30;

/// Cleans user-supplied caption text before it is embedded in the model
/// instruction. Control characters, double quotes and backslashes are
/// removed and the result is capped at 30 characters; ordinary caption text
/// passes through unchanged.
pub fn sanitize_custom_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .take(CUSTOM_TEXT_MAX_CHARS)
        .collect();
    cleaned.trim().to_string()
}

/// Renders the generation instruction for one request. Pure and
/// deterministic: identical options always produce identical output.
pub fn build_prompt(options: &GraduationOptions) -> String {
    let confetti_clause = if options.confetti.is_none() {
        "- No confetti.".to_string()
    } else {
        "- Scattered naturally in the background. DO NOT cover the face.".to_string()
    };

    let caption = sanitize_custom_text(&options.custom_text);
    let caption_clause = if caption.is_empty() {
        "- No text overlay.".to_string()
    } else {
        format!("- elegantly written at the bottom center: \"{caption}\"")
    };

    format!(
        r#"ACT AS: "Graduation Photo Generator v2.0".
TASK: Generate a high-quality graduation photo based on the uploaded image.

[CRITICAL INSTRUCTION - IDENTITY LOCK]
Use the EXACT same face from the uploaded photo. Do NOT change ANY facial features. Lock onto every pixel of the face.
- Eyes, Nose, Mouth, Eyebrows: Must be 100% identical to the original.
- Skin texture, moles, scars: Preserve perfectly.
- Facial shape, jawline: Do NOT slim or alter.
- Expression: Keep the exact original expression.
- DO NOT BEAUTIFY OR "FIX" THE FACE. It must look like the EXACT same person.

[RENDERING DETAILS]
1. SUBJECT: The person in the photo wearing a graduation gown and cap (mortarboard).
   - School Level: {school_level} (Adjust cap/gown size and style appropriately).
   - Gown Color: {gown_color}.
   - Cap: Matching the gown, sitting naturally on the head. Tassel visible.

2. BACKGROUND: {background}.
   - If it's a solid color, make it professional studio lighting.
   - If it's a theme (like Cherry Blossom), apply a soft blur for depth.

3. CONFETTI: {confetti}
   {confetti_clause}

4. TEXT:
   {caption_clause}

5. STYLE: Professional Studio Photography. High resolution, sharp focus on eyes, soft flattering lighting.

6. ASPECT RATIO: 2:3 Portrait.
"#,
        school_level = options.school_level.as_str(),
        gown_color = options.gown_color.as_str(),
        background = options.background.as_str(),
        confetti = options.confetti.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{BackgroundStyle, ConfettiType, GownColor, SchoolLevel};

    fn options(confetti: ConfettiType, custom_text: &str) -> GraduationOptions {
        GraduationOptions {
            school_level: SchoolLevel::University,
            gown_color: GownColor::Black,
            background: BackgroundStyle::CherryBlossom,
            confetti,
            custom_text: custom_text.to_string(),
        }
    }

    #[test]
    fn identical_options_render_identical_prompts() {
        let opts = options(ConfettiType::Gold, "Class of 2026");
        assert_eq!(build_prompt(&opts), build_prompt(&opts));
    }

    #[test]
    fn interpolates_selected_values() {
        let prompt = build_prompt(&options(ConfettiType::Gold, ""));
        assert!(prompt.contains("School Level: 대학교"));
        assert!(prompt.contains("Gown Color: 클래식 블랙"));
        assert!(prompt.contains("BACKGROUND: 벚꽃 블러"));
    }

    #[test]
    fn no_confetti_emits_only_the_noop_clause() {
        let prompt = build_prompt(&options(ConfettiType::None, ""));
        assert!(prompt.contains("- No confetti."));
        assert!(!prompt.contains("Scattered naturally"));
    }

    #[test]
    fn confetti_selection_emits_only_the_scatter_clause() {
        let prompt = build_prompt(&options(ConfettiType::Pastel, ""));
        assert!(prompt.contains("- Scattered naturally in the background. DO NOT cover the face."));
        assert!(!prompt.contains("- No confetti."));
    }

    #[test]
    fn empty_custom_text_has_no_caption_clause() {
        let prompt = build_prompt(&options(ConfettiType::None, ""));
        assert!(prompt.contains("- No text overlay."));
        assert!(!prompt.contains("elegantly written"));
    }

    #[test]
    fn custom_text_appears_verbatim_exactly_once() {
        let prompt = build_prompt(&options(ConfettiType::None, "Class of 2026"));
        assert_eq!(prompt.matches("Class of 2026").count(), 1);
        assert!(prompt.contains("elegantly written at the bottom center: \"Class of 2026\""));
    }

    #[test]
    fn sanitize_passes_benign_text_through() {
        assert_eq!(sanitize_custom_text("축하해요 2026"), "축하해요 2026");
    }

    #[test]
    fn sanitize_strips_quotes_and_control_characters() {
        assert_eq!(sanitize_custom_text("say \"cheese\"\n"), "say cheese");
        assert_eq!(sanitize_custom_text("a\\b"), "ab");
    }

    #[test]
    fn sanitize_caps_length_at_thirty_chars() {
        let long = "a".repeat(80);
        assert_eq!(sanitize_custom_text(&long).chars().count(), 30);
    }
}

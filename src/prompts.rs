//! Prompt templates for the text and image models.
//!
//! Every prompt lives here so wording changes never touch stage logic, and
//! tests can assert on prompt content without a model.
//!
//! The image prompts are deliberately redundant and emphatic. Image models
//! are unreliable at rendering legible, correctly spelled text, so the
//! composite prompt states the legibility rules up front, repeats the
//! "exact words only" constraint next to the content, and ends with an
//! explicit re-read step.

use crate::config::Style;

/// System instruction for every text-generation call.
pub const ANALYST_SYSTEM_PROMPT: &str =
    "You are a meticulous expert legal analyst and editor. You explain legal text to non-lawyers \
accurately, plainly, and without inventing facts that the text does not state.";

/// Build the concept-extraction prompt.
///
/// `instructions` is the schema-specific numbered list of what to extract;
/// the proofreading step and the output contract are appended here so every
/// schema gets them.
pub fn extraction_prompt(instructions: &str, legal_text: &str) -> String {
    format!(
        r#"Your task is to analyze the following legal text with extreme precision.

{instructions}
- **Proofread:** Meticulously check your output for any spelling or grammatical errors. Double-check every word before outputting the JSON. The output must be flawless, because it will be printed verbatim on an infographic.

Legal Text:
"""
{legal_text}
"""

Output only the JSON object. Every required field must be present, every list must have exactly the number of entries the schema allows, and no string may be empty."#
    )
}

// ── Schema-specific extraction instructions ──────────────────────────────

pub const POINTS_INSTRUCTIONS: &str = r#"1. **Title:** Write a short, catchy title for the whole text (at most 8 words).
2. **Key Points:** Extract between 3 and 6 key points. For each point give:
   - `title`: a short, catchy title (at most 6 words),
   - `description`: a one-sentence explanation in plain language,
   - `illustrationPrompt`: a simple, concise prompt for an AI to draw a text-free illustration of the point (a concrete visual subject, no words or letters).
3. **Summary:** Write a brief, clear summary of the text (one or two sentences)."#;

pub const PAIR_INSTRUCTIONS: &str = r#"1. **Title:** Write a short title for the whole text (at most 8 words).
2. **Key Concept A / Key Concept B:** Identify the two most important legal concepts. For each give `concept` (a short phrase, at most 5 words) and exactly 2 `details` (each a short phrase, at most 12 words).
3. **Summary:** Write a one-sentence summary that connects the two concepts."#;

pub const SCALE_INSTRUCTIONS: &str = r#"1. **Title:** Write a short title naming what is being weighed (at most 8 words).
2. **Left Scale / Right Scale:** Identify the two interests, rights, or obligations the text balances against each other. For each give `concept` (a short phrase, at most 5 words) and exactly 2 `details` (each a short phrase, at most 12 words).
3. **Summary:** Write a one-sentence summary of how the text strikes the balance."#;

pub const CLOVER_INSTRUCTIONS: &str = r#"1. **Summary:** Write a one-sentence summary of the legal text; it will be the headline.
2. **Key Concepts:** Extract exactly 4 key concepts. For each give `concept` (a short phrase, at most 4 words), `description` (one short sentence), and `icon` (one or two words naming a simple line-art icon, e.g. "gavel", "handshake").
3. **Relationships:** Write a short paragraph (at most 3 sentences) explaining how the four concepts connect."#;

pub const MAP_INSTRUCTIONS: &str = r#"1. **Concepts:** Identify between 2 and 8 key legal concepts, each a short phrase.
2. **Relationships:** Describe between 1 and 8 relationships between those concepts, each one sentence naming the concepts it links.
3. **Summary:** Write a brief, clear summary of the text."#;

// ── Structure planning ───────────────────────────────────────────────────

/// Build the structure-planning prompt.
pub fn structure_prompt(legal_text: &str) -> String {
    format!(
        r#"You are an expert in information design. Your task is to convert complex legal text into a simple, clear, and logical structure for an infographic.

**Crucial Constraint:** Your output will be used by another AI to generate an image. Therefore, your proposed structure MUST be simple. Avoid complex layouts, overlapping elements, or dense text blocks. Prioritize clarity and simplicity so the final image is readable.

Analyze the legal text and describe a simple infographic structure.

**Your description must include:**
- **Sections:** A logical breakdown with clear, concise headings. Use simple columnar or row-based layouts.
- **Visual Elements:** Suggest simple, distinct icons.
- **Flow:** Describe how the sections connect.
- **Text:** All text must be brief and meticulously proofread.

Answer in plain prose or a short bulleted list. Do not output JSON or code.

Legal Text:
"""
{legal_text}
"""
"#
    )
}

// ── Image prompts ────────────────────────────────────────────────────────

/// Prompt for one decorative, text-free illustration.
pub fn illustration_prompt(subject: &str, style: Style) -> String {
    format!(
        r#"Generate a single, simple, clear illustration for an infographic.
- The style must be {direction}.
- The composition should be clean and uncluttered.
- The subject of the illustration is: "{subject}"
- The illustration MUST be isolated on a plain, light beige background (#f5f1ec).
- DO NOT include any text, letters, or numbers in the image.
- The image should be square."#,
        direction = style.direction(),
        subject = subject.trim(),
    )
}

/// Legibility rules shared by every composite infographic.
pub const LEGIBILITY_RULES: &str = r#"**CRITICAL: YOUR #1 PRIORITY IS PERFECT TEXT LEGIBILITY.**
- All text must be 100% complete and spelled correctly, with no typos, garbled letters, or invented words.
- Use a clean, bold, sans-serif font (like Arial or Helvetica) for ALL text.
- Render ONLY the words given in the content section below. Do NOT add, remove, paraphrase, or translate any word.
- The title must be the largest text; headings must be larger than body text; body text must still be easily readable.
- Keep generous spacing around every text block. Text must never overlap shapes, icons, or other text.
- Align text cleanly (centered inside shapes, left-aligned in paragraphs)."#;

pub const CLOVER_LAYOUT: &str = r#"1. **Background:** Use a plain, solid white background for the entire image.
2. **Color Palette:** Use a simple, professional palette. The main color for shapes is dark blue (#003366). All text inside shapes is white. All text outside shapes is black.
3. **Main Title:** Place the "Summary" text at the top-center. Use black text. Place a short, dark blue horizontal line directly underneath it.
4. **Central Graphic:** Four interconnected dark blue circles arranged like a four-leaf clover or a 2x2 grid with connecting elements. Place one "Key Concept" inside each circle, white, centered, and perfectly readable. Place that concept's description in small black text just outside its circle.
5. **Icons:** Place four simple, black, line-art icons around the central graphic, one per concept, matching the suggested icon names. Never place icons inside the circles.
6. **Relationships Text:** Place the "Relationships" text below the central graphic in black, slightly smaller than the main title."#;

pub const PAIR_LAYOUT: &str = r#"1. **Background:** Use a plain, light beige background (#f5f1ec).
2. **Title:** Place the title at the top-center in large, dark charcoal (#2b2b2b) text.
3. **Two Panels:** Below the title, two equal side-by-side rounded panels. The left panel holds "Key Concept A", the right panel holds "Key Concept B". Each panel shows its concept as a heading and its two details as short bullet points beneath it.
4. **Icons:** One simple, flat icon at the top of each panel, related to that panel's concept. No text inside icons.
5. **Connector:** A single simple arrow or line between the two panels. No labels on it.
6. **Summary:** Place the summary in a full-width banner at the bottom, in smaller text than the title."#;

pub const SCALE_LAYOUT: &str = r#"1. **Background:** Use a plain, light beige background (#f5f1ec).
2. **Title:** Place the title at the top-center in large, dark charcoal (#2b2b2b) text.
3. **Central Graphic:** A large, simple scales-of-justice graphic in the center, drawn with clean flat shapes in dark blue (#003366).
4. **Left Side:** Under the left pan, show the "Left Scale" concept as a heading with its two details as short bullet points beneath it.
5. **Right Side:** Under the right pan, show the "Right Scale" concept as a heading with its two details as short bullet points beneath it. Both sides must use identical text sizes.
6. **Summary:** Place the summary at the bottom-center, in smaller text than the title."#;

pub const MAP_LAYOUT: &str = r#"1. **Background:** Use a plain, solid white background.
2. **Headline:** Place the summary at the top-center in black text.
3. **Concepts:** Show each concept inside its own dark blue (#003366) rounded box with white text, arranged in a simple, evenly spaced grid. Do not overlap boxes.
4. **Relationships:** Below the grid, list each relationship as a short numbered line in black text. Do not draw crossing arrows.
5. **Icons:** At most one small, simple line-art icon per concept box, placed above the box."#;

/// Assemble a composite infographic prompt.
///
/// `content` is the pre-formatted block of every extracted string; it is
/// embedded verbatim.
pub fn composite_prompt(
    layout_rules: &str,
    content: &str,
    style: Style,
    structure: Option<&str>,
) -> String {
    let mut prompt = String::with_capacity(
        LEGIBILITY_RULES.len() + layout_rules.len() + content.len() + 1024,
    );
    prompt.push_str(
        "You are an expert graphic designer tasked with creating a professional and visually \
engaging infographic.\n\n",
    );
    prompt.push_str(LEGIBILITY_RULES);
    prompt.push_str("\n\n**Design and Layout Instructions (NON-NEGOTIABLE, follow these EXACTLY):**\n\n");
    prompt.push_str(layout_rules);
    prompt.push_str(&format!(
        "\n\n**Art Direction:** Draw shapes and icons in {}. Style never overrides the legibility rules.\n",
        style.direction()
    ));

    if let Some(plan) = structure.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str(
            "\n**Layout Guidance (from an information designer; follow it where it does not \
conflict with the instructions above):**\n",
        );
        prompt.push_str(plan);
        prompt.push('\n');
    }

    prompt.push_str(
        "\n**Content for the Infographic (render every word EXACTLY as written, and nothing else):**\n\n",
    );
    prompt.push_str(content);
    prompt.push_str(
        "\n\n**Final Check (CRITICAL):** Before outputting the image, re-read every piece of text \
you rendered against the content above, letter by letter:\n\
- Every single word from the content is present and spelled correctly.\n\
- No word was added, changed, or omitted.\n\
- The layout exactly matches the instructions.\n\
- All text is perfectly clear and legible.\n\
If anything is wrong, fix it before you output.\n\n\
Produce a single high-quality, high-resolution infographic image.",
    );
    prompt
}

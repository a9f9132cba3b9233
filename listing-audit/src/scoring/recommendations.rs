//! Recommendation templates. Every rule that measures something reports the
//! measured value back to the seller.

/// Closing advice appended to every report; carries no deduction.
pub const GENERAL_RECOMMENDATION: &str = "Consider professional services: keyword research & SEO, \
enhanced brand content, review management, image enhancement, competitor benchmarking, \
backend keyword optimization and an advertising (PPC) audit.";

pub(super) fn missing_title() -> String {
    "Title is missing. Add a descriptive title that leads with the product type and its key features and benefits.".to_string()
}

pub(super) fn short_title(length: usize) -> String {
    format!(
        "Your title is only {length} characters. Aim for 60-80 characters and work in the keywords shoppers search for."
    )
}

pub(super) fn overlong_title(length: usize) -> String {
    format!(
        "Your title is {length} characters long. Shorten it to under 200 characters so it stays readable in search results."
    )
}

pub(super) fn no_bullets() -> String {
    "No bullet points found. Add 5 concise bullet points highlighting the key product benefits.".to_string()
}

pub(super) fn few_bullets(count: usize) -> String {
    let noun = if count == 1 { "bullet point" } else { "bullet points" };
    format!(
        "Only {count} {noun} detected. Aim for 5 bullet points covering specific features and benefits."
    )
}

pub(super) fn thin_bullet(position: usize, words: usize) -> String {
    let noun = if words == 1 { "word" } else { "words" };
    format!(
        "Bullet {position} has only {words} {noun}. Expand it to clearly describe the feature or benefit."
    )
}

pub(super) fn missing_description() -> String {
    "Description is missing. Add a detailed description covering product benefits, usage and the brand story.".to_string()
}

pub(super) fn short_description(length: usize) -> String {
    format!(
        "Your product description is only {length} characters. Expand it to at least 150 characters to answer common customer questions and concerns."
    )
}

pub(super) fn no_images() -> String {
    "No images found. Add high-quality product images showing multiple angles and lifestyle context.".to_string()
}

pub(super) fn few_images(count: usize) -> String {
    let noun = if count == 1 { "image" } else { "images" };
    format!(
        "Only {count} {noun} detected. Include at least 3 high-resolution images showing different angles and use cases."
    )
}

pub(super) fn negative_sentiment(average: f64) -> String {
    format!(
        "Customer reviews are mostly negative (average sentiment {average:.2}). Investigate common complaints and address them in the listing and in the product itself."
    )
}

pub(super) fn mixed_sentiment(average: f64) -> String {
    format!(
        "Customer sentiment is mixed (average sentiment {average:.2}). Highlight positive feedback in the description and address recurring issues in the Q&A section."
    )
}

// Prompt template for product scans
// Author: kelexine (https://github.com/kelexine)

/// Build the instruction sent with every product image.
///
/// The barcode is interpolated verbatim between single quotes.
pub fn build_prompt(barcode: &str) -> String {
    format!(
        "You are a helpful product analysis assistant. \
         Analyze the product in the image, which has the barcode data: '{barcode}'.\n\n\
         Provide a concise, user-friendly analysis formatted exactly like this:\n\
         **Product Name:** [Your identified product name]\n\
         **Description:** [A single, engaging sentence describing the product]\n\
         **Key Features:**\n\
         * [Feature 1]\n\
         * [Feature 2]\n\
         * [Feature 3]"
    )
}

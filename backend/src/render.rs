//! Server-rendered HTML for the prediction form and its results

use axum::response::Html;
use shared::RecommendationText;

const REGIONS: &[&str] = &["North", "East", "South", "West"];
const CROPS: &[&str] = &["Wheat", "Rice", "Maize", "Barley", "Soybean", "Cotton"];
const SOIL_TYPES: &[&str] = &["Sandy", "Clay", "Loam", "Silt", "Peaty", "Chalky"];
const WEATHER_CONDITIONS: &[&str] = &["Sunny", "Rainy", "Cloudy"];
const YES_NO: &[&str] = &["Yes", "No"];

/// Render the prediction page.
///
/// The same page serves the empty form, a successful prediction with its
/// recommendations, and a failed request with its error message.
pub fn predict_page(
    prediction: Option<f64>,
    recommendations: Option<&RecommendationText>,
    error_message: Option<&str>,
) -> Html<String> {
    let mut results = String::new();

    if let Some(message) = error_message {
        results.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(message)
        ));
    }

    if let Some(value) = prediction {
        results.push_str(&format!(
            "<p class=\"result\">Predicted yield: <strong>{:.2} tons/hectare</strong></p>\n",
            value
        ));
    }

    if let Some(recommendation) = recommendations {
        results.push_str(&format!(
            "<section class=\"recommendations\">\n\
             <h2>Recommendations</h2>\n\
             <div class=\"recommendation-text\">{}</div>\n\
             </section>\n",
            escape_html(&recommendation.text)
        ));
    }

    let form = format!(
        "<form method=\"post\" action=\"/\">\n\
         {region}{crop}{soil}\n\
         {rainfall}{temperature}\n\
         {fertilizer}{irrigation}\n\
         {weather}{days}\n\
         <button type=\"submit\">Predict Yield</button>\n\
         </form>",
        region = select_field("Region", "region", REGIONS),
        crop = select_field("Crop", "crop", CROPS),
        soil = select_field("Soil type", "soil_type", SOIL_TYPES),
        rainfall = number_field("Rainfall (mm)", "rainfall"),
        temperature = number_field("Temperature (Celsius)", "temperature"),
        fertilizer = select_field("Fertilizer used", "fertilizer_used", YES_NO),
        irrigation = select_field("Irrigation used", "irrigation_used", YES_NO),
        weather = select_field("Weather condition", "weather", WEATHER_CONDITIONS),
        days = number_field("Days to harvest", "days_to_harvest"),
    );

    let page = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Crop Yield Advisor</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }}\n\
         label {{ display: block; margin-top: 0.75rem; }}\n\
         input, select {{ width: 100%; padding: 0.4rem; margin-top: 0.25rem; }}\n\
         button {{ margin-top: 1rem; padding: 0.5rem 1.5rem; }}\n\
         .error {{ color: #b00020; }}\n\
         .result {{ font-size: 1.2rem; }}\n\
         .recommendation-text {{ white-space: pre-line; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>Crop Yield Advisor</h1>\n\
         {results}\
         {form}\n\
         </body>\n\
         </html>\n",
        results = results,
        form = form,
    );

    Html(page)
}

fn select_field(label: &str, name: &str, values: &[&str]) -> String {
    let options: String = values
        .iter()
        .map(|value| format!("<option value=\"{0}\">{0}</option>", value))
        .collect();
    format!(
        "<label>{label}\n<select name=\"{name}\">{options}</select>\n</label>\n",
        label = label,
        name = name,
        options = options,
    )
}

fn number_field(label: &str, name: &str) -> String {
    format!(
        "<label>{label}\n<input type=\"number\" name=\"{name}\" step=\"any\" required>\n</label>\n",
        label = label,
        name = name,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

//! Sentiment analysis: transcript emotion scores and the sentiment chart card.

use crate::agents::RemoteAction;
use crate::backend::contracts::{SentimentAnalysis, TranscriptRequest, ANALYZE_SENTIMENT};
use crate::backend::BackendClient;
use crate::ui::markup::{esc, Tone};
use crate::ui::UiPatch;

pub const RESULTS_CONTAINER: &str = "sentiment-results";

pub const ANALYZE: RemoteAction = RemoteAction {
    endpoint: ANALYZE_SENTIMENT,
    loading: "Analyzing sentiment with Llama 3.x...",
    error_context: "Error analyzing sentiment",
    failure_context: "Error analyzing sentiment",
};

pub async fn analyze_transcript(
    client: &BackendClient,
    ui: &mut UiPatch,
    transcript: &str,
) -> Option<SentimentAnalysis> {
    ANALYZE
        .call_enveloped(client, ui, &TranscriptRequest { transcript })
        .await
}

/// Indicator bar color: >75 success, >50 info, >25 warning, else danger.
pub fn emotion_tone(score: f64) -> Tone {
    if score > 75.0 {
        Tone::Success
    } else if score > 50.0 {
        Tone::Info
    } else if score > 25.0 {
        Tone::Warning
    } else {
        Tone::Danger
    }
}

pub fn moment_tone(sentiment: &str) -> Tone {
    match sentiment {
        "positive" => Tone::Success,
        "negative" => Tone::Danger,
        _ => Tone::Secondary,
    }
}

pub fn overall_tone(overall: &str) -> Tone {
    match overall {
        "Very Positive" => Tone::Success,
        "Positive" => Tone::Info,
        "Neutral" => Tone::Secondary,
        "Negative" => Tone::Warning,
        _ => Tone::Danger,
    }
}

pub fn render_analysis(analysis: &SentimentAnalysis) -> String {
    let indicators = [
        ("Confidence", analysis.confidence),
        ("Enthusiasm", analysis.enthusiasm),
        ("Anxiety", analysis.anxiety),
        ("Hesitation", analysis.hesitation),
        ("Engagement", analysis.engagement),
    ];

    let charts: String = indicators
        .iter()
        .map(|(emotion, score)| {
            format!(
                r#"<div class="mb-3">
    <div class="d-flex justify-content-between"><span>{emotion}</span><span>{score}%</span></div>
    <div class="progress"><div class="progress-bar bg-{tone}" role="progressbar" style="width: {score}%"></div></div>
</div>
"#,
                tone = emotion_tone(*score).as_str(),
            )
        })
        .collect();

    let moments: String = analysis
        .key_moments
        .iter()
        .map(|moment| {
            format!(
                r#"<li><span class="timestamp">{timestamp}</span> <span class="moment-text">{text}</span> <span class="badge bg-{tone}">{sentiment}</span></li>"#,
                timestamp = esc(&moment.timestamp),
                text = esc(&moment.text),
                tone = moment_tone(&moment.sentiment).as_str(),
                sentiment = esc(&moment.sentiment),
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <div class="card-header">
        <h5 class="mb-0">Sentiment Analysis Results</h5>
    </div>
    <div class="card-body">
        <div class="row">
            <div class="col-md-6">
                <h6>Emotional Indicators:</h6>
                {charts}
            </div>
            <div class="col-md-6">
                <h6>Key Moments:</h6>
                <ul class="sentiment-moments">{moments}</ul>
            </div>
        </div>
        <div class="sentiment-summary mt-4">
            <h5>Summary:</h5>
            <p>{summary}</p>
        </div>
    </div>
    <div class="card-footer">
        <div class="overall-sentiment text-center">
            <h4>Overall Impression: <span class="badge bg-{overall_tone}">{overall}</span></h4>
        </div>
    </div>
</div>
"#,
        summary = esc(&analysis.summary),
        overall_tone = overall_tone(&analysis.overall_sentiment).as_str(),
        overall = esc(&analysis.overall_sentiment),
    )
}

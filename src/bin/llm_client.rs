use anyhow::{Context, Result};
use rpc_weather_llm::{
    config,
    rpc::{self, ClientSettings},
    schema::{TextClassificationRequest, TextGenerationRequest},
};
use tarpc::context;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load().await?;

    let addr = config.language_server.socket_addr()?;
    let client = rpc::connect_language_model(addr, &ClientSettings::from(&config.rpc_client))
        .await
        .with_context(|| format!("Error opening connection to {addr}"))?;

    let generate_request = TextGenerationRequest {
        max_length: 150,
        temperature: 0.8,
        ..TextGenerationRequest::new("Once upon a time in Silicon Valley,")
    };

    println!("\nGenerating text with prompt: {}", generate_request.prompt);
    let generated = client
        .generate_text(context::current(), generate_request)
        .await
        .context("Error calling GenerateText")??;
    println!(
        "\nGenerated Text (took {:.2} seconds):\n{}\n",
        generated.generation_time, generated.generated_text
    );

    let classifications = [
        (
            "I absolutely loved this movie! The acting was superb and the story was engaging.",
            vec!["positive", "negative", "neutral"],
        ),
        (
            "Python is a versatile programming language with great libraries for machine learning and data science.",
            vec!["technology", "sports", "entertainment", "education"],
        ),
    ];

    for (text, labels) in classifications {
        println!("Classifying text: {text}");
        let request = TextClassificationRequest {
            text: text.to_string(),
            labels: labels.into_iter().map(String::from).collect(),
        };
        let result = client
            .classify_text(context::current(), request)
            .await
            .context("Error calling ClassifyText")??;
        println!(
            "\nClassification Result (took {:.2} seconds):\nLabel: {}\nConfidence: {:.2}\n",
            result.classification_time, result.label, result.confidence
        );
    }

    Ok(())
}

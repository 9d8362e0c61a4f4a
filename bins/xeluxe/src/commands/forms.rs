//! Contact enquiries and job applications

use crate::context::Context;
use crate::output;
use anyhow::{bail, Result};
use std::path::Path;
use xeluxe_api_client::content::format_file_size;
use xeluxe_api_client::endpoints::careers::{JobApplication, Resume};
use xeluxe_api_client::endpoints::contact::ContactForm;
use xeluxe_api_client::state::Mutation;

/// Submit the contact form
pub async fn contact(ctx: &Context, form: ContactForm) -> Result<()> {
    let api = ctx.client.contact();
    let mutation = Mutation::new(move |form: ContactForm| {
        let api = api.clone();
        async move { api.submit(&form).await }
    });

    let state = mutation.submit(form).await;

    if ctx.json() {
        output::json(&serde_json::json!({
            "success": state.success,
            "message": state.data.as_ref().map(|receipt| receipt.message.as_str()),
            "error": state.error_message(),
        }))?;
    }

    match (state.data, state.error) {
        (Some(receipt), None) => {
            if !ctx.json() {
                let message = if receipt.message.is_empty() {
                    "Thank you! We will get back to you soon."
                } else {
                    receipt.message.as_str()
                };
                output::success(message);
            }
            Ok(())
        }
        (_, Some(error)) => bail!("{error}"),
        (None, None) => bail!("Submission finished without a result"),
    }
}

/// Apply for a position with a resume from disk
pub async fn apply(
    ctx: &Context,
    job_id: i64,
    full_name: String,
    email: String,
    phone: String,
    cover_letter: String,
    resume_path: &Path,
) -> Result<()> {
    let resume = Resume::from_path(resume_path)?;
    let resume_size = format_file_size(resume.bytes.len() as u64);

    let application = JobApplication {
        job_id,
        full_name,
        email,
        phone,
        cover_letter,
        resume,
    };

    let receipt = ctx.client.careers().apply(&application).await?;

    if ctx.json() {
        return output::json(&receipt);
    }

    output::success(&format!(
        "Application sent with {} ({resume_size})",
        application.resume.file_name
    ));
    if !receipt.message.is_empty() {
        println!("  {}", receipt.message);
    }
    Ok(())
}

//! services/console/src/app/embed.rs
//!
//! The embed widget manager: generate, list, and revoke the tokens that let
//! a public, unauthenticated iframe or script reach a bot's chat endpoint.
//!
//! For tokens that already exist, the embed codes are rendered locally from
//! the widget origin, using the same iframe and script templates the
//! issuance service emits for a freshly generated token.

use crate::app::state::AppState;
use crate::error::AppError;
use botverse_core::domain::{BotId, EmbedCode, EmbedTokenRecord};
use chrono::Local;
use tracing::info;

/// Builds the embed code bundle for an existing token.
pub fn embed_codes_for_token(widget_base_url: &str, embed_token: &str) -> EmbedCode {
    let widget_url = format!(
        "{}/embed/widget/{}",
        widget_base_url.trim_end_matches('/'),
        embed_token
    );

    let iframe_code = format!(
        r#"<iframe src="{widget_url}" width="400" height="600" frameborder="0" style="border-radius: 10px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);"></iframe>"#
    );

    let js_code = format!(
        r#"<div id="botverse-chat-widget"></div>
<script>
  (function() {{
    var widget = document.createElement('iframe');
    widget.src = '{widget_url}';
    widget.width = '400';
    widget.height = '600';
    widget.frameBorder = '0';
    widget.style.borderRadius = '10px';
    widget.style.boxShadow = '0 4px 6px rgba(0, 0, 0, 0.1)';
    widget.style.position = 'fixed';
    widget.style.bottom = '20px';
    widget.style.right = '20px';
    widget.style.zIndex = '9999';
    document.getElementById('botverse-chat-widget').appendChild(widget);
  }})();
</script>"#
    );

    EmbedCode {
        embed_token: embed_token.to_string(),
        iframe_code,
        js_code,
        widget_url,
    }
}

/// The code view for a listed token. Revoked tokens never render one.
pub fn renderable_code(widget_base_url: &str, token: &EmbedTokenRecord) -> Option<EmbedCode> {
    token
        .is_active
        .then(|| embed_codes_for_token(widget_base_url, &token.embed_token))
}

pub async fn generate(state: &AppState, bot_id: &str) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    let code = state.gateway.generate_embed_code(&bot_id).await?;
    info!("Generated embed token for bot {}", bot_id);
    println!("New embed code generated.");
    print_code(&code);
    Ok(())
}

pub async fn tokens(state: &AppState, bot_id: &str, show_code: bool) -> Result<(), AppError> {
    let bot_id = BotId(bot_id.to_string());
    let tokens = state.gateway.list_embed_tokens(&bot_id).await?;

    if tokens.is_empty() {
        println!("No embed tokens yet. Generate one with `botverse embed generate {}`.", bot_id);
        return Ok(());
    }

    println!("Existing embed tokens ({}):", tokens.len());
    for token in &tokens {
        let status = if token.is_active { "Active" } else { "Revoked" };
        let shown = &token.embed_token[..token.embed_token.len().min(16)];
        let created = token.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        println!("{}...  {}  created {}", shown, status, created);

        if show_code {
            if let Some(code) = renderable_code(&state.config.widget_base_url, token) {
                print_code(&code);
            }
        }
    }
    Ok(())
}

pub async fn revoke(state: &AppState, embed_token: &str) -> Result<(), AppError> {
    state.gateway.revoke_embed_token(embed_token).await?;
    info!("Revoked embed token {}", embed_token);
    println!("Token revoked.");
    Ok(())
}

fn print_code(code: &EmbedCode) {
    println!("Token: {}", code.embed_token);
    println!();
    println!("iFrame embed code:");
    println!("{}", code.iframe_code);
    println!();
    println!("JavaScript widget code:");
    println!("{}", code.js_code);
    println!();
    println!("Direct widget URL:");
    println!("{}", code.widget_url);
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn iframe_code_matches_the_widget_template() {
        let code = embed_codes_for_token("http://localhost:3000", "tok-123");
        assert_eq!(code.widget_url, "http://localhost:3000/embed/widget/tok-123");
        assert_eq!(
            code.iframe_code,
            r#"<iframe src="http://localhost:3000/embed/widget/tok-123" width="400" height="600" frameborder="0" style="border-radius: 10px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);"></iframe>"#
        );
        assert!(code.js_code.contains("botverse-chat-widget"));
        assert!(code.js_code.contains(&code.widget_url));
    }

    #[test]
    fn a_trailing_slash_on_the_origin_is_tolerated() {
        let code = embed_codes_for_token("http://localhost:3000/", "tok-123");
        assert_eq!(code.widget_url, "http://localhost:3000/embed/widget/tok-123");
    }

    #[test]
    fn revoked_tokens_render_no_code_view() {
        let active = EmbedTokenRecord {
            embed_token: "tok-a".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        let revoked = EmbedTokenRecord {
            embed_token: "tok-b".to_string(),
            is_active: false,
            created_at: Utc::now(),
        };

        assert!(renderable_code("http://localhost:3000", &active).is_some());
        assert!(renderable_code("http://localhost:3000", &revoked).is_none());
    }
}

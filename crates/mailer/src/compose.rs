//! MIME message assembly
//!
//! Builds the multipart email (plain-text part plus HTML part) from a
//! rendered template and an independently generated text body. The text
//! body is derived from the same context fields as the HTML, so the two
//! variants always carry the same information.

use crate::templates::{OtpContext, WaitlistContext};
use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use smtpmailer_core::{MailerError, MessageType, SmtpConfig};

/// Assemble the full multipart message with From/To/Subject headers
pub fn build_message(
    config: &SmtpConfig,
    recipient: &str,
    subject: &str,
    text_body: String,
    html_body: String,
) -> Result<Message, MailerError> {
    let from = Mailbox::new(
        Some(config.from_name.clone()),
        config
            .from_email
            .parse()
            .map_err(|e| MailerError::Composition(format!("Invalid from address: {e}")))?,
    );
    let to = Mailbox::new(
        None,
        recipient
            .parse()
            .map_err(|e| MailerError::Composition(format!("Invalid recipient address: {e}")))?,
    );

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text_body),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_body),
                ),
        )
        .map_err(|e| MailerError::Composition(format!("Failed to build message: {e}")))
}

/// Subject line for the OTP email
pub fn otp_subject(app_name: &str) -> String {
    format!("Código de verificación - {app_name}")
}

/// Subject line for the waitlist confirmation email
pub fn waitlist_subject(app_name: &str) -> String {
    format!("¡Gracias por registrarte! - {app_name}")
}

/// Plain-text alternative for the OTP email
pub fn otp_text_body(context: &OtpContext) -> String {
    let mut body = format!(
        "Código de verificación - {}\n\n\
         Hola,\n\n\
         Tu código de verificación es: {}\n",
        context.app_name, context.otp_code
    );
    if context.show_expiry {
        body.push_str(&format!(
            "\nEste código expira en {} minutos.\n",
            context.expiry_minutes
        ));
    }
    if let Some(url) = context
        .redirect_url
        .as_deref()
        .filter(|_| context.show_verification_button)
    {
        body.push_str(&format!("\nVerifica tu cuenta aquí: {url}\n"));
    }
    body.push_str(
        "\nSi no solicitaste este código, puedes ignorar este mensaje de forma segura.\n\
         Este es un mensaje automático, no respondas directamente.",
    );
    body
}

/// Plain-text alternative for the waitlist confirmation email
pub fn waitlist_text_body(context: &WaitlistContext) -> String {
    // Same sentence as the HTML availability message, without markup
    let availability = match context.message_type {
        MessageType::Platform => {
            "En cuanto nuestra plataforma esté disponible oficialmente".to_string()
        }
        MessageType::Single => format!(
            "En cuanto {} esté disponible oficialmente",
            context.offerings_text
        ),
        MessageType::Multiple => format!(
            "En cuanto nuestras soluciones {} estén disponibles oficialmente",
            context.offerings_text
        ),
    };

    let mut body = format!(
        "¡Gracias por unirte a {}!\n\n\
         Hola {},\n\n\
         Hemos registrado exitosamente tu correo ({}) en nuestra lista de notificaciones.\n\n\
         {}, te enviaremos un correo para que puedas acceder al sistema y disfrutar todas sus funcionalidades.\n",
        context.app_name, context.user_name, context.user_email, availability
    );
    if let Some(support) = &context.support_email {
        body.push_str(&format!(
            "\n¿Tienes alguna pregunta?\n\
             Puedes escribirnos a {support} si necesitas más información sobre el proyecto o el proceso de lanzamiento.\n"
        ));
    }
    if context.show_website_button
        && let Some(url) = &context.website_url
    {
        body.push_str(&format!("\n{url}\n"));
    }
    body.push_str(&format!(
        "\n© 2025 {}. Todos los derechos reservados.\n\
         Este es un mensaje automático, no respondas directamente.",
        context.company_name
    ));
    body
}

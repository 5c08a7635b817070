//! Enhanced-mode prompt construction
//!
//! Enhanced mode does not change the wire contract. It rewrites the
//! description into a fuller brief so the remote service leans towards a
//! complete specification, and flags the request with `enhancedMode` and
//! `bugFreeMode`.

use cherry_core::domain::cherry::Stack;
use cherry_core::dto::spec::GenerateSpecRequest;

/// Turns a plain request into its enhanced-mode variant
pub fn enhance(mut req: GenerateSpecRequest) -> GenerateSpecRequest {
    if req.is_enhanced() {
        return req;
    }
    req.description = enhanced_description(&req);
    req.enhanced_mode = Some(true);
    req.bug_free_mode = Some(true);
    req
}

/// Builds the richer natural-language brief for a request
pub fn enhanced_description(req: &GenerateSpecRequest) -> String {
    let mut lines = vec![
        format!(
            "Create a {} tiny app that does: {}",
            req.category,
            req.description.trim()
        ),
        String::new(),
        "Requirements:".to_string(),
        format!("- Stack: {} ({})", req.stack, stack_guidance(&req.stack)),
        format!("- Database: {}", yes_no(req.include_database, "Fireproof with live queries")),
        format!("- Cloud sync: {}", yes_no(req.include_sync, "Fireproof Cloud")),
        format!("- Authentication: {}", yes_no(req.include_auth, "device keypairs")),
        String::new(),
        "Quality bar:".to_string(),
        "- Ships as a single portable executable".to_string(),
        "- Works offline first and handles empty and error states".to_string(),
        "- Every listed feature is implemented end to end, no placeholders".to_string(),
        "- Builds cleanly with the stack's standard toolchain".to_string(),
    ];

    if req.include_database {
        lines.push("- Data survives restarts and supports create, read, update and delete".to_string());
    }

    lines.join("\n")
}

fn yes_no(enabled: bool, detail: &str) -> String {
    if enabled {
        format!("yes, {}", detail)
    } else {
        "no".to_string()
    }
}

fn stack_guidance(stack: &str) -> &'static str {
    match stack.parse::<Stack>() {
        Ok(Stack::GoGin) => "Go backend with embedded React frontend, small single binary",
        Ok(Stack::GoFyne) => "native Go desktop UI",
        Ok(Stack::BunHono) => "Bun runtime with Hono, TypeScript end to end",
        Ok(Stack::RustAxum) => "Rust backend with React frontend, smallest and fastest",
        Ok(Stack::TauriReact) => "Tauri shell around a React UI",
        Ok(Stack::Static) => "pure HTML, CSS and JS, no backend",
        Err(_) => "stack chosen by the user",
    }
}

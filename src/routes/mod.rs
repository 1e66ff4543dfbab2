mod contact;
mod health_check;
mod newsletter;

pub(crate) use contact::submit_contact;
pub(crate) use health_check::health_check;
pub(crate) use newsletter::subscribe;

pub(crate) fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;

    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}

fn main() {
    if let Err(e) = hostman::cli::run() {
        eprintln!("Error: {e}");
        if e
            .downcast_ref::<hostman::HostsError>()
            .is_some_and(hostman::HostsError::is_permission_denied)
        {
            eprintln!(
                "The hosts file is usually writable only by an administrator; re-run elevated."
            );
        }
        std::process::exit(1);
    }
}

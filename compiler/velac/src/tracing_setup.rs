use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set. `VELA_LOG_TREE=1` prints spans as
/// an indented tree instead of flat lines. All output goes to stderr so it
/// never mixes with `-print-inputs`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let tree = std::env::var("VELA_LOG_TREE").is_ok_and(|v| v == "1");
        let tree_layer = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(std::io::stderr)
        });
        let fmt_layer = (!tree).then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
        });

        tracing_subscriber::registry()
            .with(tree_layer)
            .with(fmt_layer)
            .with(EnvFilter::from_default_env())
            .init();
    });
}

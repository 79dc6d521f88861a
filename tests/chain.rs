use logprinter::render_chain;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
struct Layered {
    msg: &'static str,
    source: Option<Box<Layered>>,
}

impl fmt::Display for Layered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.msg)
    }
}

impl Error for Layered {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[test]
fn single_error_renders_display_only() {
    let err = Layered {
        msg: "timeout",
        source: None,
    };
    assert_eq!(render_chain(&err), "timeout");
}

#[test]
fn sources_render_as_caused_by_lines() {
    let err = Layered {
        msg: "request failed",
        source: Some(Box::new(Layered {
            msg: "connection reset",
            source: Some(Box::new(Layered {
                msg: "broken pipe",
                source: None,
            })),
        })),
    };
    assert_eq!(
        render_chain(&err),
        "request failed\nCaused by: connection reset\nCaused by: broken pipe"
    );
}

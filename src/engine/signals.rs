//! Static token catalogs used by the classifier.
//!
//! Each catalog is compiled once per process into a matcher. Hooks, event
//! props and dynamic calls are plain substring matches; client globals are
//! matched as whole words.

use std::fmt;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::Serialize;

/// The canonical spelling of the directive after quote normalization.
pub const DIRECTIVE: &str = "'use client'";

/// React hooks that can only run in a client component.
pub const HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useContext",
    "useReducer",
    "useLayoutEffect",
    "useRef",
    "useCallback",
    "useMemo",
];

/// Browser globals that do not exist during server rendering.
pub const CLIENT_GLOBALS: &[&str] = &["window", "document", "navigator"];

/// JSX event-handler props.
pub const EVENT_PROPS: &[&str] = &[
    "onClick",
    "onChange",
    "onSubmit",
    "onMouseEnter",
    "onMouseLeave",
    "onScroll",
    "onKeyDown",
    "onKeyUp",
    "onFocus",
    "onBlur",
];

/// Call expressions whose result differs between server and client renders.
pub const DYNAMIC_CALLS: &[&str] = &["Math.random()", "Date.now()"];

/// Next.js data-fetching functions that only run on the server.
pub const SERVER_FUNCTIONS: &[&str] = &["getServerSideProps", "getStaticProps", "getInitialProps"];

/// The four independent client signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// A React hook call.
    Hook,
    /// A browser global such as `window`.
    ClientGlobal,
    /// A JSX event-handler prop.
    EventProp,
    /// A non-deterministic call such as `Date.now()`.
    DynamicCall,
}

impl SignalKind {
    /// Short label used in text reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hook => "hook",
            Self::ClientGlobal => "client-global",
            Self::EventProp => "event-prop",
            Self::DynamicCall => "dynamic-call",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog token found in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SignalMatch {
    /// Which signal fired.
    pub kind: SignalKind,
    /// The catalog token that matched.
    pub token: &'static str,
}

impl fmt::Display for SignalMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.token)
    }
}

/// A substring catalog backed by an Aho-Corasick automaton.
struct Catalog {
    tokens: &'static [&'static str],
    automaton: AhoCorasick,
}

impl Catalog {
    fn new(tokens: &'static [&'static str]) -> Self {
        let automaton = AhoCorasick::new(tokens).expect("Failed to build Aho-Corasick automaton");
        Self { tokens, automaton }
    }

    fn contains(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }

    /// Distinct tokens present in `text`, in catalog order.
    fn matches(&self, text: &str) -> Vec<&'static str> {
        let mut seen = vec![false; self.tokens.len()];
        for mat in self.automaton.find_overlapping_iter(text) {
            seen[mat.pattern().as_usize()] = true;
        }
        self.tokens
            .iter()
            .zip(seen)
            .filter_map(|(token, hit)| hit.then_some(*token))
            .collect()
    }
}

static HOOK_CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(HOOKS));
static EVENT_CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(EVENT_PROPS));
static DYNAMIC_CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(DYNAMIC_CALLS));
static SERVER_CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(SERVER_FUNCTIONS));

static CLIENT_GLOBAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(window|document|navigator)\b").unwrap());

/// Returns the first server-only function mentioned anywhere in `text`.
pub fn server_function(text: &str) -> Option<&'static str> {
    if !SERVER_CATALOG.contains(text) {
        return None;
    }
    SERVER_CATALOG.matches(text).into_iter().next()
}

fn client_globals(text: &str) -> Vec<&'static str> {
    CLIENT_GLOBALS
        .iter()
        .copied()
        .filter(|global| {
            CLIENT_GLOBAL_REGEX
                .find_iter(text)
                .any(|m| m.as_str() == *global)
        })
        .collect()
}

/// Runs all four client signals over `text` and returns every match.
///
/// Matches are grouped by signal in the order hook, client global, event
/// prop, dynamic call. An empty result means no client usage was found.
pub fn detect(text: &str) -> Vec<SignalMatch> {
    let tagged = |kind: SignalKind, tokens: Vec<&'static str>| {
        tokens
            .into_iter()
            .map(move |token| SignalMatch { kind, token })
    };

    tagged(SignalKind::Hook, HOOK_CATALOG.matches(text))
        .chain(tagged(SignalKind::ClientGlobal, client_globals(text)))
        .chain(tagged(SignalKind::EventProp, EVENT_CATALOG.matches(text)))
        .chain(tagged(SignalKind::DynamicCall, DYNAMIC_CATALOG.matches(text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SignalKind> {
        detect(text).into_iter().map(|m| m.kind).collect()
    }

    #[test]
    fn test_hook_is_plain_substring() {
        assert_eq!(kinds("const [a, b] = useState(0);"), vec![SignalKind::Hook]);
        // No word boundary: a longer identifier still counts.
        assert_eq!(kinds("useStateMachine()"), vec![SignalKind::Hook]);
    }

    #[test]
    fn test_client_global_requires_whole_word() {
        assert_eq!(kinds("window.scrollTo(0, 0)"), vec![SignalKind::ClientGlobal]);
        assert!(kinds("const windowSize = 3;").is_empty());
        assert!(kinds("const mydocument = 1;").is_empty());
    }

    #[test]
    fn test_event_prop_and_dynamic_call() {
        assert_eq!(
            kinds("<button onClick={go}>{Date.now()}</button>"),
            vec![SignalKind::EventProp, SignalKind::DynamicCall]
        );
    }

    #[test]
    fn test_dynamic_call_needs_exact_parens() {
        assert!(kinds("const f = Math.random;").is_empty());
        assert!(kinds("Date.now(offset)").is_empty());
    }

    #[test]
    fn test_detect_reports_every_token_once() {
        let matches = detect("useEffect(() => { useEffect(); useRef(); })");
        let tokens: Vec<_> = matches.iter().map(|m| m.token).collect();
        assert_eq!(tokens, vec!["useEffect", "useRef"]);
    }

    #[test]
    fn test_overlapping_tokens_both_reported() {
        let tokens: Vec<_> = detect("onKeyDown onKeyUp").iter().map(|m| m.token).collect();
        assert_eq!(tokens, vec!["onKeyDown", "onKeyUp"]);
    }

    #[test]
    fn test_server_function() {
        assert_eq!(
            server_function("export async function getStaticProps() {}"),
            Some("getStaticProps")
        );
        assert_eq!(server_function("export default function Page() {}"), None);
    }

    #[test]
    fn test_signal_match_display() {
        let m = SignalMatch {
            kind: SignalKind::EventProp,
            token: "onClick",
        };
        assert_eq!(m.to_string(), "event-prop:onClick");
    }
}

//! Common test helpers and fixtures.

#![allow(dead_code)]

pub mod temp_workspace;

// Re-export for convenience
pub use temp_workspace::TestWorkspace;

/// A small Next.js project covering every classification outcome.
///
/// Flagged: `app/counter.tsx`, `components/Button.tsx`,
/// `components/Viewport.tsx`, `lib/id.ts`.
pub fn next_app_fixture() -> String {
    r#"
//- /app/page.tsx
import Counter from './counter';

export default function Home() {
  return <main><Counter /></main>;
}
//- /app/counter.tsx
import { useState } from 'react';

export default function Counter() {
  const [count, setCount] = useState(0);
  return <p>{count}</p>;
}
//- /app/client-counter.tsx
"use client";
import { useState } from 'react';

export default function ClientCounter() {
  const [count, setCount] = useState(0);
  return <button onClick={() => setCount(count + 1)}>{count}</button>;
}
//- /components/Button.tsx
export function Button({ handleClick }: { handleClick: () => void }) {
  return <button onClick={handleClick}>Go</button>;
}
//- /components/Viewport.tsx
export function Viewport() {
  return <span>{window.innerWidth}</span>;
}
//- /components/Note.tsx
// window.location is only read in the client wrapper
export function Note() {
  return <p>"Open in a new window"</p>;
}
//- /pages/posts.tsx
export async function getServerSideProps() {
  return { props: {} };
}

export default function Posts() {
  return <button onClick={() => {}}>Reload</button>;
}
//- /lib/id.ts
export const makeId = () => Math.random().toString(36);
//- /lib/format.ts
export const format = (n: number) => n.toFixed(2);
//- /lib/legacy.js
export const now = () => Date.now();
//- /node_modules/react/index.ts
export function useState() {}
//- /.next/server/app/page.tsx
window.__NEXT_DATA__ = {};
//- /dist/bundle.tsx
document.body.onclick = null;
"#
    .to_string()
}

/// Paths flagged in [`next_app_fixture`], relative and sorted.
pub fn next_app_flagged() -> Vec<String> {
    vec![
        "app/counter.tsx".to_string(),
        "components/Button.tsx".to_string(),
        "components/Viewport.tsx".to_string(),
        "lib/id.ts".to_string(),
    ]
}

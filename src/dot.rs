use std::io;
use std::io::Write;

use crate::nfa::Automaton;

impl Automaton {
    /// Write the automaton in Graphviz dot format. Accept states are drawn
    /// as double circles and the start state gets an unlabelled arrow.
    pub fn output_dot(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "digraph {{")?;
        writeln!(w, "rankdir=LR")?;
        writeln!(w, "start[shape=point]")?;
        writeln!(w, "start -> id{}", self.start())?;

        for (src, state) in self.states() {
            let shape = if self.is_accept(src) {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(w, "node[label=\"{src}\", shape={shape}] id{src}")?;

            for edge in state.edges() {
                let label = edge
                    .label
                    .to_string()
                    .replace('\\', "\\\\")
                    .replace('"', "\\\"");
                writeln!(w, "id{src} -> id{} [label=\"{label}\"]", edge.target)?;
            }
        }

        writeln!(w, "}}")?;

        Ok(())
    }
}

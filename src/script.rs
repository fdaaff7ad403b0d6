//! Windowless chat: questions come in as lines, answers are awaited.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};

use crate::conversation::Conversation;

/// Submits every line of `input` and returns once the input has ended and
/// every scheduled reply has been appended. Blank lines are skipped like
/// blank submissions.
pub async fn run_script<R>(conversation: &mut Conversation, input: R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut reading = true;

    while reading || conversation.pending_replies() > 0 {
        tokio::select! {
            line = lines.next_line(), if reading => match line? {
                Some(line) => {
                    conversation.submit(&line);
                }
                None => {
                    log::debug!(
                        "Input ended; waiting for {} reply(ies)",
                        conversation.pending_replies()
                    );
                    reading = false;
                }
            },
            Some(_) = conversation.next_reply() => {}
            else => break,
        }
    }
    Ok(())
}

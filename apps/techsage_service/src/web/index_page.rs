use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>TechSage: Connected Intelligence</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 16px; font-size: 18px; }
    textarea, input, select { width: 100%; font-size: 18px; padding: 8px; box-sizing: border-box; }
    textarea { height: 150px; }
    .cols { display: flex; gap: 16px; }
    .cols > div { flex: 1; }
    button { font-size: 18px; padding: 8px 16px; margin: 8px 8px 8px 0; }
    .error { color: #b00020; }
    .result { white-space: pre-wrap; border: 1px solid #ccc; padding: 12px; }
    details { border: 1px solid #ddd; margin: 8px 0; padding: 8px; }
    nav button.active { font-weight: bold; }
  </style>
</head>
<body>
  <h1>TechSage: Connected Intelligence</h1>
  <p>Build a request from three ingredients: the task, the context and the tone.</p>

  <label>Google Gemini API Key <input id="api-key" type="password" autocomplete="off" /></label>

  <nav>
    <button id="tab-builder" class="active">Prompt Builder</button>
    <button id="tab-saved">Saved Prompts</button>
  </nav>

  <section id="builder">
    <div class="cols">
      <div>
        <label><strong>1. The Task</strong><br />What do you want the AI to do?
          <textarea id="task" placeholder="Example: Write a song for my mom"></textarea></label>
      </div>
      <div>
        <label><strong>2. The Context</strong><br />Who is this for? Any details?
          <textarea id="context" placeholder="Example: Mom loves gardening and classical music..."></textarea></label>
      </div>
    </div>
    <label><strong>3. The Tone</strong> <select id="tone"></select></label>
    <div>
      <button id="generate">Generate</button>
      <button id="clear">Clear Inputs</button>
    </div>
    <p id="message" class="error"></p>
    <div id="staged" hidden>
      <p><strong>Gemini says:</strong></p>
      <div id="staged-content" class="result"></div>
      <button id="save">Save this result</button>
    </div>
  </section>

  <section id="saved" hidden>
    <h2>Your Collection</h2>
    <p id="empty">You haven't saved anything yet. Go to the Builder tab to create something!</p>
    <button id="download" hidden>Download All as Text File</button>
    <div id="items"></div>
  </section>

  <script>
    let sessionId = null;
    const $ = (id) => document.getElementById(id);

    async function api(method, path, body) {
      const headers = { "x-session-id": sessionId };
      if (body !== undefined) headers["content-type"] = "application/json";
      const response = await fetch(path, {
        method,
        headers,
        body: body === undefined ? undefined : JSON.stringify(body),
      });
      if (!response.ok) {
        const payload = await response.json().catch(() => ({}));
        throw new Error(payload.error || response.statusText);
      }
      return response.status === 204 ? null : response;
    }

    async function start() {
      const created = await fetch("/v1/sessions", { method: "POST" }).then((r) => r.json());
      sessionId = created.session_id;
      const tones = await fetch("/v1/tones").then((r) => r.json());
      for (const tone of tones) {
        const option = new Option(tone.label, tone.label, tone.default, tone.default);
        $("tone").add(option);
      }
    }

    window.addEventListener("pagehide", () => {
      if (!sessionId) return;
      fetch("/v1/session", {
        method: "DELETE",
        headers: { "x-session-id": sessionId },
        keepalive: true,
      });
    });

    function showTab(name) {
      $("builder").hidden = name !== "builder";
      $("saved").hidden = name !== "saved";
      $("tab-builder").classList.toggle("active", name === "builder");
      $("tab-saved").classList.toggle("active", name === "saved");
      if (name === "saved") renderCollection();
    }

    async function renderCollection() {
      const view = await api("GET", "/v1/collection").then((r) => r.json());
      $("empty").hidden = view.count > 0;
      $("download").hidden = view.count === 0;
      $("items").replaceChildren();
      for (const item of view.items) {
        const details = document.createElement("details");
        const summary = document.createElement("summary");
        summary.textContent = `${item.title} (Saved item #${item.item_number})`;
        const context = document.createElement("p");
        context.textContent = `Context provided: ${item.context}`;
        const content = document.createElement("div");
        content.className = "result";
        content.textContent = item.content;
        const remove = document.createElement("button");
        remove.textContent = "Delete this";
        remove.onclick = async () => {
          await api("DELETE", `/v1/collection/${item.index}`);
          renderCollection();
        };
        details.append(summary, context, content, remove);
        $("items").append(details);
      }
    }

    $("tab-builder").onclick = () => showTab("builder");
    $("tab-saved").onclick = () => showTab("saved");

    $("generate").onclick = async () => {
      $("message").textContent = "";
      $("generate").disabled = true;
      try {
        const staged = await api("POST", "/v1/generate", {
          task: $("task").value,
          context: $("context").value,
          tone: $("tone").value,
          api_key: $("api-key").value,
        }).then((r) => r.json());
        $("staged-content").textContent = staged.content;
        $("staged").hidden = false;
      } catch (error) {
        $("message").textContent = error.message;
      } finally {
        $("generate").disabled = false;
      }
    };

    $("clear").onclick = async () => {
      await api("POST", "/v1/clear");
      $("task").value = "";
      $("context").value = "";
      $("staged").hidden = true;
      $("message").textContent = "";
    };

    $("save").onclick = async () => {
      try {
        await api("POST", "/v1/collection", { context: $("context").value });
        $("message").textContent = "Saved to your collection!";
      } catch (error) {
        $("message").textContent = error.message;
      }
    };

    $("download").onclick = async () => {
      const blob = await api("GET", "/v1/collection/export").then((r) => r.blob());
      const link = document.createElement("a");
      link.href = URL.createObjectURL(blob);
      link.download = "my_techsage_collection.txt";
      link.click();
      URL.revokeObjectURL(link.href);
    };

    start().catch((error) => { $("message").textContent = error.message; });
  </script>
</body>
</html>
"#;
